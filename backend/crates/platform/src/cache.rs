//! Expiring Key-Value Cache
//!
//! A small in-process cache with a fixed time-to-live per entry.
//!
//! Expiry is checked lazily: an entry is only evicted when a lookup finds it
//! past its deadline. On top of that, [`ExpiringCache::spawn_sweeper`] runs a
//! periodic task that drops **every** entry on each tick regardless of its
//! own deadline. The sweep is a coarse global reset, not per-entry eviction.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;

/// Millisecond wall clock used for expiry decisions
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Real wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Hand-driven clock for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn starting_at(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

impl<C: Clock> Clock for Arc<C> {
    fn now_ms(&self) -> i64 {
        self.as_ref().now_ms()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at_ms: i64,
}

impl<V> CacheEntry<V> {
    // Still valid at exactly `expires_at_ms`.
    fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }
}

/// Process-wide cache with lazy expiry.
///
/// Shared between request handlers through an `Arc`; the internal map is
/// guarded by a mutex so concurrent handlers on a multi-threaded runtime see
/// consistent entries.
pub struct ExpiringCache<K, V, C = SystemClock> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    default_ttl: Duration,
    clock: C,
}

impl<K, V> ExpiringCache<K, V, SystemClock>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, SystemClock)
    }
}

impl<K, V, C> ExpiringCache<K, V, C>
where
    K: Eq + Hash,
    V: Clone,
    C: Clock,
{
    pub fn with_clock(default_ttl: Duration, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            clock,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Store `value` until `now + ttl`, replacing any previous entry
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let expires_at_ms = self.clock.now_ms().saturating_add(ttl.as_millis() as i64);
        self.lock().insert(
            key,
            CacheEntry {
                value,
                expires_at_ms,
            },
        );
    }

    /// [`set`](Self::set) with the cache's default TTL
    pub fn insert(&self, key: K, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Live value for `key`; an expired entry is evicted and `None` returned
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now_ms = self.clock.now_ms();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now_ms) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Same expiry boundary as [`get`](Self::get), without cloning the value
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now_ms = self.clock.now_ms();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now_ms) => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().remove(key);
    }

    /// Drop every entry, expired or not
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let dropped = entries.len();
        entries.clear();
        dropped
    }

    /// Number of stored entries, including ones not yet lazily evicted
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        // A panicking writer cannot leave the map half-updated.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V, C> ExpiringCache<K, V, C>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    /// Clear the whole cache every `interval` until the handle is aborted.
    ///
    /// The first clear happens one full interval after the call.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let dropped = cache.clear();
                tracing::info!(entries_dropped = dropped, "Periodic cache cleanup");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_at(start_ms: i64) -> (ExpiringCache<String, u32, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_at(start_ms));
        let cache = ExpiringCache::with_clock(Duration::from_secs(3600), Arc::clone(&clock));
        (cache, clock)
    }

    #[test]
    fn test_get_immediately_after_set() {
        let (cache, _clock) = cache_at(1_000);
        cache.set("2024-01-01-2024-01-31".to_string(), 7, Duration::from_millis(1000));
        assert_eq!(cache.get("2024-01-01-2024-01-31"), Some(7));
        assert!(cache.has("2024-01-01-2024-01-31"));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let (cache, clock) = cache_at(0);
        cache.set("k".to_string(), 1, Duration::from_millis(1000));

        clock.advance(Duration::from_millis(1000));
        assert_eq!(cache.get("k"), Some(1), "still valid exactly at the deadline");

        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0, "expired entry is evicted on lookup");
    }

    #[test]
    fn test_has_uses_same_boundary_as_get() {
        let (cache, clock) = cache_at(0);
        cache.set("k".to_string(), 1, Duration::from_millis(1000));

        clock.advance(Duration::from_millis(1000));
        assert!(cache.has("k"));

        clock.advance(Duration::from_millis(1));
        assert!(!cache.has("k"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_uses_default_ttl() {
        let (cache, clock) = cache_at(0);
        cache.insert("k".to_string(), 3);
        clock.advance(Duration::from_secs(3599));
        assert_eq!(cache.get("k"), Some(3));
        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_set_replaces_and_delete_removes() {
        let (cache, _clock) = cache_at(0);
        cache.insert("k".to_string(), 1);
        cache.insert("k".to_string(), 2);
        assert_eq!(cache.get("k"), Some(2));

        cache.delete("k");
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_clear_drops_unexpired_entries() {
        let (cache, _clock) = cache_at(0);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_clears_everything_each_interval() {
        let cache = Arc::new(ExpiringCache::<String, u32>::new(Duration::from_secs(48 * 3600)));
        cache.insert("fresh".to_string(), 1);

        let sweeper = cache.spawn_sweeper(Duration::from_secs(24 * 3600));
        tokio::task::yield_now().await;

        tokio::time::sleep(Duration::from_secs(23 * 3600)).await;
        assert!(cache.has("fresh"), "no sweep before the first interval");

        tokio::time::sleep(Duration::from_secs(2 * 3600)).await;
        assert!(cache.is_empty(), "sweep ignores per-entry expiry");

        sweeper.abort();
    }
}
