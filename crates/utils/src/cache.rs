use std::{collections::HashMap, hash::Hash, sync::{Arc, Mutex, RwLock}, time::{Duration, Instant}};

/// Time source for cache expiry. Production uses [SystemClock]; tests drive
/// a [ManualClock] so TTL behavior is deterministic.
pub trait Clock: Send + Sync {
  fn now(&self) -> Instant;
}

#[derive(Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> Instant {
    Instant::now()
  }
}

/// A clock that only moves when told to.
pub struct ManualClock {
  now: Mutex<Instant>,
}

impl ManualClock {
  pub fn new() -> Self {
    ManualClock {
      now: Mutex::new(Instant::now()),
    }
  }

  pub fn advance(&self, duration: Duration) {
    let mut now = self.now.lock().unwrap();
    *now += duration;
  }
}

impl Default for ManualClock {
  fn default() -> Self {
    ManualClock::new()
  }
}

impl Clock for ManualClock {
  fn now(&self) -> Instant {
    *self.now.lock().unwrap()
  }
}

struct CacheEntry<V> {
  value: V,
  expires_at: Instant,
}

/// A keyed cache with one fixed TTL and no active invalidation: entries
/// only leave by expiring. Writers after a miss race benignly; the last
/// insert wins.
pub struct TtlCache<K, V> {
  entries: RwLock<HashMap<K, CacheEntry<V>>>,
  ttl: Duration,
  clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
  K: Eq + Hash + Clone,
  V: Clone,
{
  pub fn new(ttl: Duration) -> Self {
    TtlCache::with_clock(ttl, Arc::new(SystemClock))
  }

  pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
    TtlCache {
      entries: RwLock::new(HashMap::new()),
      ttl,
      clock,
    }
  }

  /// Returns the cached value if present and not expired. An expired entry
  /// is dropped and treated as a miss.
  pub fn get(&self, key: &K) -> Option<V> {
    let now = self.clock.now();
    let mut entries = self.entries.write().unwrap();
    match entries.get(key) {
      Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
      Some(_) => {
        entries.remove(key);
        None
      }
      None => None,
    }
  }

  pub fn insert(&self, key: K, value: V) {
    let expires_at = self.clock.now() + self.ttl;
    self
      .entries
      .write()
      .unwrap()
      .insert(key, CacheEntry { value, expires_at });
  }

  /// Returns the cached value, or computes, stores and returns it.
  pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
  where
    F: FnOnce() -> V,
  {
    if let Some(value) = self.get(&key) {
      return value;
    }
    let value = compute();
    self.insert(key, value.clone());
    value
  }
}

#[cfg(test)]
mod tests {
  use crate::cache::{ManualClock, TtlCache};
  use std::{sync::Arc, time::Duration};

  #[test]
  fn test_entries_expire_after_ttl() {
    let clock = Arc::new(ManualClock::new());
    let cache: TtlCache<i64, String> =
      TtlCache::with_clock(Duration::from_secs(20), clock.clone());

    cache.insert(1, "cached".to_string());
    clock.advance(Duration::from_secs(5));
    assert_eq!(cache.get(&1), Some("cached".to_string()));

    clock.advance(Duration::from_secs(16));
    assert_eq!(cache.get(&1), None);
  }

  #[test]
  fn test_get_or_compute_skips_recompute_within_ttl() {
    let clock = Arc::new(ManualClock::new());
    let cache: TtlCache<i64, i32> = TtlCache::with_clock(Duration::from_secs(20), clock.clone());

    let first = cache.get_or_compute(1, || 10);
    let second = cache.get_or_compute(1, || 99);
    assert_eq!(first, 10);
    assert_eq!(second, 10);

    clock.advance(Duration::from_secs(21));
    let third = cache.get_or_compute(1, || 99);
    assert_eq!(third, 99);
  }

  #[test]
  fn test_insert_resets_expiry() {
    let clock = Arc::new(ManualClock::new());
    let cache: TtlCache<i64, i32> = TtlCache::with_clock(Duration::from_secs(20), clock.clone());

    cache.insert(1, 1);
    clock.advance(Duration::from_secs(15));
    cache.insert(1, 2);
    clock.advance(Duration::from_secs(10));
    assert_eq!(cache.get(&1), Some(2));
  }

  #[test]
  fn test_keys_are_independent() {
    let cache: TtlCache<i64, i32> = TtlCache::new(Duration::from_secs(60));
    cache.insert(1, 10);
    cache.insert(2, 20);
    assert_eq!(cache.get(&1), Some(10));
    assert_eq!(cache.get(&2), Some(20));
    assert_eq!(cache.get(&3), None);
  }
}
