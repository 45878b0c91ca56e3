use actix_web::web::Data;
use quill_api_common::{blocking, context::QuillContext};
use quill_db::{source::{post::Post, user::User}, Crud, DbPool, PostId};
use quill_utils::{claims::Claims, APIError, QuillError};

pub mod comment;
pub mod feed;
pub mod post;
pub mod user;

#[async_trait::async_trait(?Send)]
pub trait Perform {
  type Response: serde::ser::Serialize + Send;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<Self::Response, QuillError>;
}

pub(in crate) async fn get_post(post_id: PostId, pool: &DbPool) -> Result<Post, QuillError> {
  match blocking(pool, move |conn| Post::read(conn, post_id)).await? {
    Ok(post) => Ok(post),
    Err(_e) => Err(APIError::not_found("couldnt_find_post").into()),
  }
}

pub(in crate) async fn get_user_from_jwt(jwt: &str, pool: &DbPool) -> Result<User, QuillError> {
  let claims = match Claims::decode(jwt) {
    Ok(claims) => claims.claims,
    Err(_e) => return Err(APIError::not_logged_in().into()),
  };
  let user_id = claims.sub;
  // A token for a user that no longer exists is just a stale login
  match blocking(pool, move |conn| User::read(conn, user_id)).await? {
    Ok(user) => Ok(user),
    Err(_e) => Err(APIError::not_logged_in().into()),
  }
}

pub(in crate) async fn get_user_from_jwt_opt(
  jwt: &Option<String>,
  pool: &DbPool,
) -> Result<Option<User>, QuillError> {
  match jwt {
    Some(jwt) => Ok(Some(get_user_from_jwt(jwt, pool).await?)),
    None => Ok(None),
  }
}
