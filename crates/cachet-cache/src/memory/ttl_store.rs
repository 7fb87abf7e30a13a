//! Key-value map with optional per-entry expiry.
//!
//! Expiry is an absolute epoch-second instant computed at write time. An
//! entry whose instant has been reached is logically absent; it is removed
//! lazily by the next `get` or `exists` that touches it, or by an explicit
//! [`TtlStore::purge_expired`].

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use cachet_core::traits::clock::{Clock, SystemClock};

/// A stored value and the instant it expires at.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Option<i64>,
}

impl<V> CacheEntry<V> {
    /// Expiry is inclusive: an entry is gone at its exact timestamp.
    fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Concurrent map from key to value with lazy TTL expiry.
pub struct TtlStore<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CacheEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty store reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store reading the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Write `value` under `key`, replacing any previous entry.
    ///
    /// Always returns `true`: an in-process map insert cannot fail.
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) -> bool {
        let expires_at = expiry_at(self.clock.now(), ttl);
        self.entries.insert(key, CacheEntry { value, expires_at });
        true
    }

    /// Write `value` only if `key` is absent or expired. Returns whether it was written.
    pub fn add(&self, key: K, value: V, ttl: Option<Duration>) -> bool {
        let now = self.clock.now();
        let entry = CacheEntry {
            value,
            expires_at: expiry_at(now, ttl),
        };

        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(entry);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                true
            }
        }
    }

    /// Current value of `key`. An expired entry is removed and `None` returned.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }

        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    /// Current value of `key`, or `default` when it is absent or expired.
    pub fn get_or<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Remove `key`, expired or not. Returns whether an entry was removed.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    /// Returns `true` if **any** of `keys` is present and unexpired.
    ///
    /// Expired entries among `keys` are removed.
    pub fn exists<'a, Q, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let now = self.clock.now();
        let mut any_live = false;

        for key in keys {
            let live = match self.entries.get(key) {
                Some(entry) => !entry.is_expired(now),
                None => continue,
            };

            if live {
                any_live = true;
            } else {
                self.entries.remove_if(key, |_, entry| entry.is_expired(now));
            }
        }

        any_live
    }

    /// Reset the expiry of `key` to `now + ttl`, keeping its value.
    ///
    /// The entry is refreshed even if it has already expired but was not
    /// yet purged. Returns `false` if the key is absent.
    pub fn expire<Q>(&self, key: &Q, ttl: Duration) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.expires_at = expiry_at(self.clock.now(), Some(ttl));
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn flush(&self) {
        self.entries.clear();
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    /// Number of physically stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for TtlStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for TtlStore<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlStore")
            .field("entries", &self.entries.len())
            .field("clock", &self.clock)
            .finish()
    }
}

/// `None` for no TTL, otherwise `now + ttl` in whole seconds.
fn expiry_at(now: i64, ttl: Option<Duration>) -> Option<i64> {
    ttl.map(|ttl| {
        let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        now.saturating_add(secs)
    })
}
