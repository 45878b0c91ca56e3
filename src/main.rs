use actix_web::{middleware, web::Data, App, HttpServer};
use quill_api_common::{blocking, context::{FeedCache, QuillContext}};
use quill_db::{build_db_pool, get_database_url_from_env, run_migrations};
use quill_server::api_routes;
use quill_utils::{settings::Settings, QuillError};
use std::{sync::Arc, time::Duration};

#[actix_web::main]
async fn main() -> Result<(), QuillError> {
  env_logger::init();
  let settings = Settings::get();

  // Set up the r2d2 connection pool
  let db_url = match get_database_url_from_env() {
    Ok(url) => url,
    Err(_) => settings.get_database_url(),
  };
  let pool = build_db_pool(&db_url, settings.database.pool_size)?;

  // Run the migrations from code
  blocking(&pool, move |conn| run_migrations(conn)).await??;

  let feed_cache = Arc::new(FeedCache::new(Duration::from_secs(settings.feed_cache_ttl)));
  let context = QuillContext::create(pool, feed_cache);

  println!("Starting http server at {}:{}", settings.bind, settings.port);

  HttpServer::new(move || {
    App::new()
      .wrap(middleware::Logger::default())
      .app_data(Data::new(context.clone()))
      .configure(api_routes::config)
  })
  .bind((settings.bind, settings.port))?
  .run()
  .await?;

  Ok(())
}
