//! Bounded in-memory TTL cache
//!
//! Provides a `TtlCache` keyed map where every entry expires independently,
//! one instance per resource kind (games, standings, leaders, box scores),
//! each with its own capacity and time-to-live.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A cached value together with the moment it stops being valid
#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Bounded keyed map with per-entry expiry
///
/// `get` never returns an entry past its TTL; expired entries are treated as
/// absent and removed on access. When the map is full, inserting a new key
/// evicts the least-recently-inserted one. Interior mutability makes the
/// cache safe to share behind an `Arc` across concurrent fetch tasks.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    capacity: usize,
    inner: Mutex<Inner<K, V>>,
}

#[derive(Debug)]
struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// Keys in insertion order, oldest first. May hold keys already removed
    /// from `entries`; eviction skips those.
    order: VecDeque<K>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries, each valid for `ttl`
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            ttl,
            capacity,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Returns a clone of the value for `key` if present and not expired
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock().ok()?;
        match inner.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                inner.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Inserts or overwrites `key`, resetting its expiry to now + TTL
    pub fn insert(&self, key: K, value: V) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        if inner.entries.insert(key.clone(), entry).is_none() {
            inner.order.push_back(key);
            while inner.entries.len() > self.capacity {
                match inner.order.pop_front() {
                    Some(oldest) => {
                        inner.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
        }
    }

    /// Number of live (possibly expired but not yet collected) entries
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
