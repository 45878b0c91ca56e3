#[macro_use]
extern crate diesel;

pub mod pagination;
pub mod schema;
pub mod source;
pub mod views;

use chrono::NaiveDateTime;
use diesel::{
  connection::SimpleConnection,
  r2d2::{ConnectionManager, CustomizeConnection, Pool},
  result::Error,
  Connection,
  SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use quill_utils::QuillError;
use serde::{Deserialize, Serialize};
use std::env;
use strum::{Display, EnumString};

pub type UserId = i32;
pub type GroupId = i32;
pub type PostId = i32;
pub type CommentId = i32;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub trait Crud {
  type InsertForm;
  type UpdateForm;
  type IdType;
  fn create(conn: &mut SqliteConnection, form: &Self::InsertForm) -> Result<Self, Error>
  where
    Self: Sized;
  fn read(conn: &mut SqliteConnection, id: Self::IdType) -> Result<Self, Error>
  where
    Self: Sized;
  fn update(
    conn: &mut SqliteConnection,
    id: Self::IdType,
    form: &Self::UpdateForm,
  ) -> Result<Self, Error>
  where
    Self: Sized;
  fn delete(conn: &mut SqliteConnection, id: Self::IdType) -> Result<usize, Error>
  where
    Self: Sized;
}

pub trait Followable {
  type Form;
  fn follow(conn: &mut SqliteConnection, form: &Self::Form) -> Result<Self, Error>
  where
    Self: Sized;
  fn unfollow(conn: &mut SqliteConnection, form: &Self::Form) -> Result<usize, Error>
  where
    Self: Sized;
}

/// The navigational contexts a feed can be assembled for.
#[derive(EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum ViewMode {
  Global,
  Group,
  Author,
  Following,
}

pub fn naive_now() -> NaiveDateTime {
  chrono::prelude::Utc::now().naive_utc()
}

/// Enables foreign keys on every pooled connection. SQLite leaves them off
/// per connection, and the cascade/detach rules live in the schema.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionCustomizer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    conn
      .batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
      .map_err(diesel::r2d2::Error::QueryError)
  }
}

pub fn build_db_pool(db_url: &str, pool_size: u32) -> Result<DbPool, QuillError> {
  let manager = ConnectionManager::<SqliteConnection>::new(db_url);
  let pool = Pool::builder()
    .max_size(pool_size)
    .connection_customizer(Box::new(ConnectionCustomizer))
    .build(manager)?;
  Ok(pool)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), QuillError> {
  conn
    .run_pending_migrations(MIGRATIONS)
    .map_err(|e| anyhow::anyhow!("Couldnt run DB migrations: {}", e))?;
  Ok(())
}

pub fn get_database_url_from_env() -> Result<String, env::VarError> {
  env::var("QUILL_DATABASE_URL")
}

/// A single-connection in-memory pool, migrated and ready. One connection,
/// because every pooled connection would otherwise get its own private
/// `:memory:` database.
pub fn build_db_pool_for_tests() -> DbPool {
  let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
  let pool = Pool::builder()
    .max_size(1)
    .connection_customizer(Box::new(ConnectionCustomizer))
    .build(manager)
    .expect("couldnt create db pool");
  let mut conn = pool.get().expect("couldnt get db connection");
  conn
    .run_pending_migrations(MIGRATIONS)
    .expect("couldnt run DB migrations");
  drop(conn);
  pool
}

/// Connects to the database named by QUILL_DATABASE_URL, or to a private
/// in-memory database when the var is unset. Used by the tests.
pub fn establish_unpooled_connection() -> SqliteConnection {
  let db_url = get_database_url_from_env().unwrap_or_else(|_| ":memory:".to_string());
  let mut conn = SqliteConnection::establish(&db_url)
    .unwrap_or_else(|_| panic!("Error connecting to {}", db_url));
  conn
    .batch_execute("PRAGMA foreign_keys = ON;")
    .expect("enable foreign keys");
  conn
    .run_pending_migrations(MIGRATIONS)
    .expect("run migrations");
  conn
}

#[cfg(test)]
mod tests {
  use crate::ViewMode;
  use std::str::FromStr;

  #[test]
  fn test_view_mode_parses() {
    assert_eq!(ViewMode::from_str("Global").unwrap(), ViewMode::Global);
    assert_eq!(ViewMode::from_str("following").unwrap(), ViewMode::Following);
    assert!(ViewMode::from_str("Trending").is_err());
  }
}
