use quill_db::{views::comment_view::CommentView, PostId};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct AddComment {
  pub post_id: PostId,
  pub text: String,
  pub auth: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct CommentResponse {
  pub comment: CommentView,
}
