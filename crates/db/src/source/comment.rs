use crate::{naive_now, schema::comment, CommentId, Crud, PostId, UserId};
use diesel::{
  dsl::insert_into,
  result::Error,
  ExpressionMethods,
  QueryDsl,
  RunQueryDsl,
  SqliteConnection,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Queryable, Identifiable, PartialEq, Debug, Serialize, Deserialize)]
#[diesel(table_name = comment)]
pub struct Comment {
  pub id: CommentId,
  pub post_id: PostId,
  pub author_id: UserId,
  pub text: String,
  pub published: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = comment)]
pub struct CommentInsertForm {
  pub post_id: PostId,
  pub author_id: UserId,
  pub text: String,
  pub published: chrono::NaiveDateTime,
}

impl CommentInsertForm {
  pub fn new(post_id: PostId, author_id: UserId, text: &str) -> Self {
    CommentInsertForm {
      post_id,
      author_id,
      text: text.into(),
      published: naive_now(),
    }
  }
}

#[derive(AsChangeset, Clone)]
#[diesel(table_name = comment)]
pub struct CommentUpdateForm {
  pub text: String,
}

impl Crud for Comment {
  type InsertForm = CommentInsertForm;
  type UpdateForm = CommentUpdateForm;
  type IdType = CommentId;

  fn read(conn: &mut SqliteConnection, comment_id: CommentId) -> Result<Self, Error> {
    use crate::schema::comment::dsl::*;
    comment.find(comment_id).first::<Self>(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &CommentInsertForm) -> Result<Self, Error> {
    use crate::schema::comment::dsl::*;
    insert_into(comment).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    comment_id: CommentId,
    form: &CommentUpdateForm,
  ) -> Result<Self, Error> {
    use crate::schema::comment::dsl::*;
    diesel::update(comment.find(comment_id))
      .set(form)
      .get_result::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, comment_id: CommentId) -> Result<usize, Error> {
    use crate::schema::comment::dsl::*;
    diesel::delete(comment.find(comment_id)).execute(conn)
  }
}

impl Comment {
  pub fn count_for_post(conn: &mut SqliteConnection, for_post_id: PostId) -> Result<i64, Error> {
    use crate::schema::comment::dsl::*;
    comment
      .filter(post_id.eq(for_post_id))
      .count()
      .get_result(conn)
  }
}
