use crate::feed::GetFeedResponse;
use quill_db::DbPool;
use quill_utils::cache::TtlCache;
use std::sync::Arc;

/// The global feed's first page is the only cached value, so a single
/// constant key suffices.
pub type FeedCache = TtlCache<i64, GetFeedResponse>;

pub const GLOBAL_FEED_CACHE_KEY: i64 = 1;

#[derive(Clone)]
pub struct QuillContext {
  /// The DB pool
  pub pool: DbPool,
  /// The TTL cache in front of the global feed
  pub feed_cache: Arc<FeedCache>,
}

impl QuillContext {
  pub fn create(pool: DbPool, feed_cache: Arc<FeedCache>) -> QuillContext {
    QuillContext { pool, feed_cache }
  }

  /// The DB pool
  pub fn pool(&self) -> &DbPool {
    &self.pool
  }

  /// The TTL cache in front of the global feed
  pub fn feed_cache(&self) -> &FeedCache {
    &self.feed_cache
  }
}
