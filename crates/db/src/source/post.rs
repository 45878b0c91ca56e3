use crate::{naive_now, schema::post, Crud, GroupId, PostId, UserId};
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
#[diesel(table_name = post)]
pub struct Post {
  pub id: PostId,
  pub text: String,
  pub image: Option<String>,
  pub author_id: UserId,
  pub group_id: Option<GroupId>,
  pub published: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = post)]
pub struct PostInsertForm {
  pub text: String,
  pub image: Option<String>,
  pub author_id: UserId,
  pub group_id: Option<GroupId>,
  pub published: chrono::NaiveDateTime,
}

impl PostInsertForm {
  pub fn new(
    author_id: UserId,
    text: &str,
    group_id: Option<GroupId>,
    image: Option<String>,
  ) -> Self {
    PostInsertForm {
      text: text.into(),
      image,
      author_id,
      group_id,
      published: naive_now(),
    }
  }
}

/// The full new content state of a post. `None` clears the column, so an
/// edit that drops the group or image actually detaches it.
#[derive(AsChangeset, Clone)]
#[diesel(table_name = post)]
#[diesel(treat_none_as_null = true)]
pub struct PostUpdateForm {
  pub text: String,
  pub image: Option<String>,
  pub group_id: Option<GroupId>,
}

impl PostUpdateForm {
  pub fn new(text: &str, group_id: Option<GroupId>, image: Option<String>) -> Self {
    PostUpdateForm {
      text: text.into(),
      image,
      group_id,
    }
  }
}

impl Crud for Post {
  type InsertForm = PostInsertForm;
  type UpdateForm = PostUpdateForm;
  type IdType = PostId;

  fn read(conn: &mut SqliteConnection, post_id: PostId) -> Result<Self, Error> {
    use crate::schema::post::dsl::*;
    post.find(post_id).first::<Self>(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &PostInsertForm) -> Result<Self, Error> {
    use crate::schema::post::dsl::*;
    insert_into(post).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    post_id: PostId,
    form: &PostUpdateForm,
  ) -> Result<Self, Error> {
    use crate::schema::post::dsl::*;
    diesel::update(post.find(post_id))
      .set(form)
      .get_result::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, post_id: PostId) -> Result<usize, Error> {
    use crate::schema::post::dsl::*;
    diesel::delete(post.find(post_id)).execute(conn)
  }
}

impl Post {
  pub fn update_content(
    conn: &mut SqliteConnection,
    post_id: PostId,
    form: &PostUpdateForm,
  ) -> Result<Self, Error> {
    Self::update(conn, post_id, form)
  }

  pub fn count_for_author(
    conn: &mut SqliteConnection,
    for_author_id: UserId,
  ) -> Result<i64, Error> {
    use crate::schema::post::dsl::*;
    post
      .filter(author_id.eq(for_author_id))
      .count()
      .get_result(conn)
  }

  pub fn is_post_author(user_id: UserId, post_author_id: UserId) -> bool {
    user_id == post_author_id
  }
}
