// In-process TTL cache for upstream API responses
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Thread-safe map of string keys to values that expire after a fixed TTL.
///
/// Expired entries are evicted lazily on the next `get` for their key; there
/// is no background sweeper. Values are cloned out so the lock is never held
/// across caller code.
pub struct TtlCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, T)>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => {
                debug!(key, "cache hit");
                Some(value.clone())
            }
            Some(_) => {
                debug!(key, "cache entry expired");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: impl Into<String>, value: T) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), (Instant::now(), value));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_returns_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("k", 42);
        assert_eq!(cache.get("k"), Some(42));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.set("k", "v");
        assert_eq!(cache.get("k"), None);
        // The expired entry was evicted, not just hidden.
        assert!(cache.is_empty());
    }

    #[test]
    fn set_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("k", 1);
        cache.set("k", 2);
        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
