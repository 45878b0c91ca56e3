use crate::{naive_now, schema::user_, Crud, UserId};
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
#[diesel(table_name = user_)]
pub struct User {
  pub id: UserId,
  pub name: String,
  pub published: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = user_)]
pub struct UserInsertForm {
  pub name: String,
  pub published: chrono::NaiveDateTime,
}

impl UserInsertForm {
  pub fn new(name: &str) -> Self {
    UserInsertForm {
      name: name.into(),
      published: naive_now(),
    }
  }
}

#[derive(AsChangeset, Clone)]
#[diesel(table_name = user_)]
pub struct UserUpdateForm {
  pub name: String,
}

impl Crud for User {
  type InsertForm = UserInsertForm;
  type UpdateForm = UserUpdateForm;
  type IdType = UserId;

  fn read(conn: &mut SqliteConnection, user_id: UserId) -> Result<Self, Error> {
    use crate::schema::user_::dsl::*;
    user_.find(user_id).first::<Self>(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &UserInsertForm) -> Result<Self, Error> {
    use crate::schema::user_::dsl::*;
    insert_into(user_).values(form).get_result::<Self>(conn)
  }

  fn update(
    conn: &mut SqliteConnection,
    user_id: UserId,
    form: &UserUpdateForm,
  ) -> Result<Self, Error> {
    use crate::schema::user_::dsl::*;
    diesel::update(user_.find(user_id))
      .set(form)
      .get_result::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, user_id: UserId) -> Result<usize, Error> {
    use crate::schema::user_::dsl::*;
    diesel::delete(user_.find(user_id)).execute(conn)
  }
}

pub trait User_ {
  fn read_from_name(conn: &mut SqliteConnection, from_name: &str) -> Result<User, Error>;
}

impl User_ for User {
  fn read_from_name(conn: &mut SqliteConnection, from_name: &str) -> Result<User, Error> {
    use crate::schema::user_::dsl::*;
    user_.filter(name.eq(from_name)).first::<User>(conn)
  }
}
