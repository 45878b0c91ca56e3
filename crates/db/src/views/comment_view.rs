use crate::{
  schema::{comment, user_},
  source::{comment::Comment, user::User},
  views::ViewToVec,
  CommentId,
  PostId,
};
use diesel::{result::Error, ExpressionMethods, QueryDsl, RunQueryDsl, SqliteConnection};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CommentView {
  pub comment: Comment,
  pub author: User,
}

type CommentViewTuple = (Comment, User);

impl CommentView {
  /// The conversation under a post, oldest first.
  pub fn for_post(conn: &mut SqliteConnection, for_post_id: PostId) -> Result<Vec<Self>, Error> {
    let res = comment::table
      .inner_join(user_::table)
      .filter(comment::post_id.eq(for_post_id))
      .order_by(comment::published.asc())
      .then_order_by(comment::id.asc())
      .select((comment::all_columns, user_::all_columns))
      .load::<CommentViewTuple>(conn)?;

    Ok(CommentView::to_vec(res))
  }

  pub fn read(conn: &mut SqliteConnection, comment_id: CommentId) -> Result<Self, Error> {
    let (comment, author) = comment::table
      .find(comment_id)
      .inner_join(user_::table)
      .select((comment::all_columns, user_::all_columns))
      .first::<CommentViewTuple>(conn)?;

    Ok(CommentView { comment, author })
  }
}

impl ViewToVec for CommentView {
  type DbTuple = CommentViewTuple;
  fn to_vec(comments: Vec<Self::DbTuple>) -> Vec<Self> {
    comments
      .into_iter()
      .map(|a| Self {
        comment: a.0,
        author: a.1,
      })
      .collect::<Vec<Self>>()
  }
}
