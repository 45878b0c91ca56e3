use crate::{get_post, get_user_from_jwt, get_user_from_jwt_opt, Perform};
use actix_web::web::Data;
use quill_api_common::{
  blocking,
  context::QuillContext,
  post::{CreatePost, EditPost, GetPost, GetPostResponse, ImageInput, PostResponse},
};
use quill_db::{
  source::{
    group::Group,
    post::{Post, PostInsertForm, PostUpdateForm},
    user_follower::UserFollower,
  },
  views::{comment_view::CommentView, post_view::PostView, user_view::UserView},
  Crud,
  DbPool,
  GroupId,
};
use quill_utils::{utils::is_image_content_type, APIError, QuillError};

/// Checks the claimed content type and hands back the stored file name.
fn image_file_name(image: &Option<ImageInput>) -> Result<Option<String>, QuillError> {
  match image {
    Some(image) => {
      if !is_image_content_type(&image.content_type) {
        return Err(APIError::validation("invalid_image_content_type").into());
      }
      Ok(Some(image.file_name.to_owned()))
    }
    None => Ok(None),
  }
}

async fn check_group_exists(group_id: Option<GroupId>, pool: &DbPool) -> Result<(), QuillError> {
  if let Some(group_id) = group_id {
    match blocking(pool, move |conn| Group::read(conn, group_id)).await? {
      Ok(_group) => {}
      Err(_e) => return Err(APIError::not_found("couldnt_find_group").into()),
    }
  }
  Ok(())
}

#[async_trait::async_trait(?Send)]
impl Perform for CreatePost {
  type Response = PostResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<PostResponse, QuillError> {
    let data: &CreatePost = &self;
    let user = get_user_from_jwt(&data.auth, context.pool()).await?;

    if data.text.trim().is_empty() {
      return Err(APIError::validation("post_text_required").into());
    }
    let image = image_file_name(&data.image)?;
    check_group_exists(data.group_id, context.pool()).await?;

    let post_form = PostInsertForm::new(user.id, data.text.trim(), data.group_id, image);
    let inserted_post = blocking(context.pool(), move |conn| {
      Post::create(conn, &post_form)
    })
    .await??;

    let post_id = inserted_post.id;
    let post_view = blocking(context.pool(), move |conn| PostView::read(conn, post_id)).await??;

    Ok(PostResponse { post: post_view })
  }
}

#[async_trait::async_trait(?Send)]
impl Perform for EditPost {
  type Response = PostResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<PostResponse, QuillError> {
    let data: &EditPost = &self;
    let user = get_user_from_jwt(&data.auth, context.pool()).await?;

    if data.text.trim().is_empty() {
      return Err(APIError::validation("post_text_required").into());
    }
    let image = image_file_name(&data.image)?;

    let orig_post = get_post(data.post_id, context.pool()).await?;

    // Only the author may edit
    if !Post::is_post_author(user.id, orig_post.author_id) {
      return Err(APIError::forbidden("no_post_edit_allowed").into());
    }

    check_group_exists(data.group_id, context.pool()).await?;

    let update_form = PostUpdateForm::new(data.text.trim(), data.group_id, image);
    let post_id = data.post_id;
    blocking(context.pool(), move |conn| {
      Post::update_content(conn, post_id, &update_form)
    })
    .await??;

    let post_view = blocking(context.pool(), move |conn| PostView::read(conn, post_id)).await??;

    Ok(PostResponse { post: post_view })
  }
}

#[async_trait::async_trait(?Send)]
impl Perform for GetPost {
  type Response = GetPostResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<GetPostResponse, QuillError> {
    let data: &GetPost = &self;
    let viewer = get_user_from_jwt_opt(&data.auth, context.pool()).await?;

    let orig_post = get_post(data.post_id, context.pool()).await?;

    let post_id = orig_post.id;
    let post_view = blocking(context.pool(), move |conn| PostView::read(conn, post_id)).await??;
    let comments = blocking(context.pool(), move |conn| {
      CommentView::for_post(conn, post_id)
    })
    .await??;

    let author_id = orig_post.author_id;
    let author_view =
      blocking(context.pool(), move |conn| UserView::read(conn, author_id)).await??;
    let author_post_count = blocking(context.pool(), move |conn| {
      Post::count_for_author(conn, author_id)
    })
    .await??;

    let (is_following, is_post_author) = match viewer {
      Some(viewer) => {
        let viewer_id = viewer.id;
        let is_following = blocking(context.pool(), move |conn| {
          UserFollower::is_following(conn, viewer_id, author_id)
        })
        .await??;
        (is_following, Post::is_post_author(viewer_id, author_id))
      }
      None => (false, false),
    };

    Ok(GetPostResponse {
      post: post_view,
      comments,
      is_following,
      follower_count: author_view.follower_count,
      following_count: author_view.following_count,
      is_post_author,
      author_post_count,
    })
  }
}
