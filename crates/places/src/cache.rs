//! Read-through cache for provider lookups.
//!
//! Entries are keyed by `(zip, keyword)`, are immutable once written, and
//! simply expire after a fixed TTL. There is no invalidation; stale entries
//! are dropped on the read that finds them expired.

use navigator_core::Provider;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    inserted: Instant,
    providers: Vec<Provider>,
}

pub struct PlacesCache {
    ttl: Duration,
    entries: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl PlacesCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached provider list for `(zip, keyword)`, or `None` on a
    /// miss. An expired entry counts as a miss and is removed.
    pub fn get(&self, zip: &str, keyword: &str) -> Option<Vec<Provider>> {
        let key = (zip.to_string(), keyword.to_string());
        let mut entries = self.entries.lock().expect("places cache lock poisoned");

        match entries.get(&key) {
            Some(entry) if entry.inserted.elapsed() > self.ttl => {
                entries.remove(&key);
                None
            }
            Some(entry) => Some(entry.providers.clone()),
            None => None,
        }
    }

    pub fn put(&self, zip: &str, keyword: &str, providers: Vec<Provider>) {
        let key = (zip.to_string(), keyword.to_string());
        let mut entries = self.entries.lock().expect("places cache lock poisoned");
        entries.insert(
            key,
            CacheEntry {
                inserted: Instant::now(),
                providers,
            },
        );
    }
}
