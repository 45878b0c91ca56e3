pub mod comment;
pub mod context;
pub mod feed;
pub mod post;
pub mod user;

use diesel::SqliteConnection;
use quill_db::DbPool;
use quill_utils::QuillError;

/// Runs a closure of diesel work on the blocking thread pool with a pooled
/// connection checked out for it.
pub async fn blocking<F, T>(pool: &DbPool, f: F) -> Result<T, QuillError>
where
  F: FnOnce(&mut SqliteConnection) -> T + Send + 'static,
  T: Send + 'static,
{
  let pool = pool.clone();
  let res = actix_web::web::block(move || {
    let mut conn = pool.get()?;
    let res = (f)(&mut conn);
    Ok(res) as Result<_, QuillError>
  })
  .await??;

  Ok(res)
}
