use quill_db::{views::{comment_view::CommentView, post_view::PostView}, GroupId, PostId};
use serde::{Deserialize, Serialize};

/// An uploaded image as the request layer hands it over: the stored file
/// name plus the content type the client claims for it.
#[derive(Deserialize, Debug, Clone)]
pub struct ImageInput {
  pub file_name: String,
  pub content_type: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
  pub text: String,
  pub group_id: Option<GroupId>,
  pub image: Option<ImageInput>,
  pub auth: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct PostResponse {
  pub post: PostView,
}

/// Carries the full new content state; a `None` group or image clears it.
#[derive(Deserialize)]
pub struct EditPost {
  pub post_id: PostId,
  pub text: String,
  pub group_id: Option<GroupId>,
  pub image: Option<ImageInput>,
  pub auth: String,
}

#[derive(Deserialize)]
pub struct GetPost {
  pub post_id: PostId,
  pub auth: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct GetPostResponse {
  pub post: PostView,
  pub comments: Vec<CommentView>,
  pub is_following: bool,
  pub follower_count: i64,
  pub following_count: i64,
  pub is_post_author: bool,
  pub author_post_count: i64,
}
