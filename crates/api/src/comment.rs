use crate::{get_post, get_user_from_jwt, Perform};
use actix_web::web::Data;
use quill_api_common::{blocking, comment::{AddComment, CommentResponse}, context::QuillContext};
use quill_db::{
  source::comment::{Comment, CommentInsertForm},
  views::comment_view::CommentView,
  Crud,
};
use quill_utils::{APIError, QuillError};

#[async_trait::async_trait(?Send)]
impl Perform for AddComment {
  type Response = CommentResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<CommentResponse, QuillError> {
    let data: &AddComment = &self;
    let user = get_user_from_jwt(&data.auth, context.pool()).await?;

    if data.text.trim().is_empty() {
      return Err(APIError::validation("comment_text_required").into());
    }

    let orig_post = get_post(data.post_id, context.pool()).await?;

    let comment_form = CommentInsertForm::new(orig_post.id, user.id, data.text.trim());
    let inserted_comment = blocking(context.pool(), move |conn| {
      Comment::create(conn, &comment_form)
    })
    .await??;

    let comment_id = inserted_comment.id;
    let comment_view = blocking(context.pool(), move |conn| {
      CommentView::read(conn, comment_id)
    })
    .await??;

    Ok(CommentResponse {
      comment: comment_view,
    })
  }
}
