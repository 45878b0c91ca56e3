use crate::{get_user_from_jwt, get_user_from_jwt_opt, Perform};
use actix_web::web::Data;
use diesel::result::{DatabaseErrorKind, Error};
use quill_api_common::{
  blocking,
  context::QuillContext,
  user::{
    FollowUser,
    FollowUserResponse,
    GetProfile,
    GetProfileResponse,
    Register,
    RegisterResponse,
  },
};
use quill_db::{
  source::{
    user::{User, UserInsertForm, User_},
    user_follower::{FollowForm, UserFollower},
  },
  views::{post_view::PostQuery, user_view::UserView},
  Crud,
  Followable,
};
use quill_utils::{
  claims::Claims,
  settings::Settings,
  utils::is_valid_username,
  APIError,
  QuillError,
};

#[async_trait::async_trait(?Send)]
impl Perform for Register {
  type Response = RegisterResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<RegisterResponse, QuillError> {
    let data: &Register = &self;

    if !is_valid_username(&data.username) {
      return Err(APIError::validation("invalid_username").into());
    }

    let user_form = UserInsertForm::new(&data.username);

    let inserted_user = match blocking(context.pool(), move |conn| {
      User::create(conn, &user_form)
    })
    .await?
    {
      Ok(user) => user,
      Err(Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
        return Err(APIError::validation("user_already_exists").into());
      }
      Err(e) => return Err(e.into()),
    };

    Ok(RegisterResponse {
      jwt: Claims::jwt(inserted_user.id, Settings::get().hostname)?,
    })
  }
}

#[async_trait::async_trait(?Send)]
impl Perform for GetProfile {
  type Response = GetProfileResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<GetProfileResponse, QuillError> {
    let data: &GetProfile = &self;
    let viewer = get_user_from_jwt_opt(&data.auth, context.pool()).await?;

    let username = data.username.to_owned();
    let subject = match blocking(context.pool(), move |conn| {
      User::read_from_name(conn, &username)
    })
    .await?
    {
      Ok(user) => user,
      Err(_e) => return Err(APIError::not_found("couldnt_find_user").into()),
    };

    let subject_id = subject.id;
    let user_view =
      blocking(context.pool(), move |conn| UserView::read(conn, subject_id)).await??;

    // Their posts, straight from the database; profiles are never cached.
    let page = data.page;
    let posts = blocking(context.pool(), move |conn| {
      PostQuery {
        author_id: Some(subject_id),
        page,
        ..Default::default()
      }
      .list(conn)
    })
    .await??;

    let (is_following, is_own_profile) = match viewer {
      Some(viewer) => {
        let viewer_id = viewer.id;
        let is_following = blocking(context.pool(), move |conn| {
          UserFollower::is_following(conn, viewer_id, subject_id)
        })
        .await??;
        (is_following, viewer_id == subject_id)
      }
      None => (false, false),
    };

    Ok(GetProfileResponse {
      user: user_view.user,
      posts,
      is_following,
      follower_count: user_view.follower_count,
      following_count: user_view.following_count,
      is_own_profile,
    })
  }
}

#[async_trait::async_trait(?Send)]
impl Perform for FollowUser {
  type Response = FollowUserResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<FollowUserResponse, QuillError> {
    let data: &FollowUser = &self;
    let viewer = get_user_from_jwt(&data.auth, context.pool()).await?;

    let followed_id = data.user_id;
    match blocking(context.pool(), move |conn| User::read(conn, followed_id)).await? {
      Ok(_user) => {}
      Err(_e) => return Err(APIError::not_found("couldnt_find_user").into()),
    }

    // Following yourself is silently ignored, not an error
    if viewer.id != followed_id {
      let follow_form = FollowForm::new(followed_id, viewer.id);
      if data.follow {
        blocking(context.pool(), move |conn| {
          UserFollower::follow(conn, &follow_form)
        })
        .await??;
      } else {
        blocking(context.pool(), move |conn| {
          UserFollower::unfollow(conn, &follow_form)
        })
        .await??;
      }
    }

    let viewer_id = viewer.id;
    let is_following = blocking(context.pool(), move |conn| {
      UserFollower::is_following(conn, viewer_id, followed_id)
    })
    .await??;
    let follower_count = blocking(context.pool(), move |conn| {
      UserFollower::follower_count(conn, followed_id)
    })
    .await??;

    Ok(FollowUserResponse {
      user_id: followed_id,
      is_following,
      follower_count,
    })
  }
}
