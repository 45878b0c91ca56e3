use quill_db::{source::user::User, views::post_view::PagedPosts, UserId};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct Register {
  pub username: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct RegisterResponse {
  pub jwt: String,
}

#[derive(Deserialize, Debug)]
pub struct GetProfile {
  pub username: String,
  pub page: Option<i64>,
  pub auth: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct GetProfileResponse {
  pub user: User,
  pub posts: PagedPosts,
  pub is_following: bool,
  pub follower_count: i64,
  pub following_count: i64,
  pub is_own_profile: bool,
}

#[derive(Deserialize)]
pub struct FollowUser {
  pub user_id: UserId,
  pub follow: bool,
  pub auth: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct FollowUserResponse {
  pub user_id: UserId,
  pub is_following: bool,
  pub follower_count: i64,
}
