use crate::{naive_now, schema::group_, Crud, GroupId};
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
#[diesel(table_name = group_)]
pub struct Group {
  pub id: GroupId,
  pub title: String,
  pub slug: String,
  pub description: String,
  pub published: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = group_)]
pub struct GroupInsertForm {
  pub title: String,
  pub slug: String,
  pub description: String,
  pub published: chrono::NaiveDateTime,
}

impl GroupInsertForm {
  pub fn new(title: &str, slug: &str, description: &str) -> Self {
    GroupInsertForm {
      title: title.into(),
      slug: slug.into(),
      description: description.into(),
      published: naive_now(),
    }
  }
}

#[derive(AsChangeset, Clone)]
#[diesel(table_name = group_)]
pub struct GroupUpdateForm {
  pub title: String,
  pub slug: String,
  pub description: String,
}

impl Crud for Group {
  type InsertForm = GroupInsertForm;
  type UpdateForm = GroupUpdateForm;
  type IdType = GroupId;

  fn read(conn: &mut SqliteConnection, group_id: GroupId) -> Result<Self, Error> {
    use crate::schema::group_::dsl::*;
    group_.find(group_id).first::<Self>(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &GroupInsertForm) -> Result<Self, Error> {
    use crate::schema::group_::dsl::*;
    insert_into(group_).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    group_id: GroupId,
    form: &GroupUpdateForm,
  ) -> Result<Self, Error> {
    use crate::schema::group_::dsl::*;
    diesel::update(group_.find(group_id))
      .set(form)
      .get_result::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, group_id: GroupId) -> Result<usize, Error> {
    use crate::schema::group_::dsl::*;
    diesel::delete(group_.find(group_id)).execute(conn)
  }
}

pub trait Group_ {
  fn read_from_slug(conn: &mut SqliteConnection, from_slug: &str) -> Result<Group, Error>;
}

impl Group_ for Group {
  fn read_from_slug(conn: &mut SqliteConnection, from_slug: &str) -> Result<Group, Error> {
    use crate::schema::group_::dsl::*;
    group_.filter(slug.eq(from_slug)).first::<Group>(conn)
  }
}
