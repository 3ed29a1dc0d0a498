use std::hash::Hash;
use std::mem::size_of;
use std::time::{Duration, Instant};

use gearcache_lib::model::{Channel, Extra, Guild, Member, User, VoiceState};
use indexmap::IndexMap;

use crate::util::config::StoreLimits;

/// Rough byte size of a cached value, only used to enforce `max_bytes`.
pub trait Weigh {
    fn weight(&self) -> usize;
}

struct Entry<V> {
    value: V,
    weight: usize,
    inserted: Instant,
}

/// Key value store bounded by item count, total weight and age. Entries are kept in write
/// order and eviction always takes the oldest write first, reads don't refresh an entry.
///
/// There is no locking in here, every mutating call takes `&mut self` and the cache keeps
/// each store behind the lock of its domain.
pub struct TlruStore<K, V> {
    entries: IndexMap<K, Entry<V>>,
    limits: StoreLimits,
    weight: usize,
}

impl<K: Hash + Eq + Copy, V: Weigh> TlruStore<K, V> {
    pub fn new(limits: StoreLimits) -> Self {
        TlruStore {
            entries: IndexMap::new(),
            limits,
            weight: 0,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| !self.is_expired(entry))
            .map(|entry| &entry.value)
    }

    /// Like `get` but also sees entries that expired and haven't been purged yet. Only meant
    /// for bookkeeping that has to undo whatever the old value registered elsewhere.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Store a value as the newest entry, returns whatever had to make room for it.
    pub fn set(&mut self, key: K, value: V) -> Vec<(K, V)> {
        if let Some(old) = self.entries.shift_remove(&key) {
            self.weight -= old.weight;
        }
        let weight = value.weight();
        self.weight += weight;
        self.entries.insert(
            key,
            Entry {
                value,
                weight,
                inserted: Instant::now(),
            },
        );
        self.purge()
    }

    /// Mutate a value in place. Doesn't count as a write for age or recency, but the entry
    /// does get weighed again.
    pub fn update<R>(&mut self, key: &K, apply: impl FnOnce(&mut V) -> R) -> Option<R> {
        if self.get(key).is_none() {
            return None;
        }
        let entry = self.entries.get_mut(key)?;
        let result = apply(&mut entry.value);
        let weight = entry.value.weight();
        self.weight = self.weight - entry.weight + weight;
        entry.weight = weight;
        Some(result)
    }

    /// Removes the entry and hands it back, expired or not.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.shift_remove(key)?;
        self.weight -= entry.weight;
        Some(entry.value)
    }

    /// Drop expired entries and then the oldest ones until every bound holds again.
    pub fn purge(&mut self) -> Vec<(K, V)> {
        let mut evicted = Vec::new();
        while let Some((_, oldest)) = self.entries.first() {
            let over_items = self.limits.max_items > 0 && self.entries.len() > self.limits.max_items;
            let over_bytes = self.limits.max_bytes > 0 && self.weight > self.limits.max_bytes;
            if !(over_items || over_bytes || self.is_expired(oldest)) {
                break;
            }
            if let Some((key, entry)) = self.entries.shift_remove_index(0) {
                self.weight -= entry.weight;
                evicted.push((key, entry.value));
            }
        }
        evicted
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries
            .values()
            .filter(move |entry| !self.is_expired(entry))
            .map(|entry| &entry.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self) -> usize {
        self.weight
    }

    fn is_expired(&self, entry: &Entry<V>) -> bool {
        self.limits.max_age > Duration::ZERO && entry.inserted.elapsed() > self.limits.max_age
    }
}

fn extra_weight(extra: &Extra) -> usize {
    // good enough, opaque fields are mostly short strings and numbers
    extra.iter().map(|(key, value)| key.len() + 32 + value.as_str().map_or(0, str::len)).sum()
}

fn string_weight(value: &Option<String>) -> usize {
    value.as_ref().map_or(0, String::len)
}

impl Weigh for User {
    fn weight(&self) -> usize {
        size_of::<User>()
            + self.username.len()
            + self.discriminator.len()
            + string_weight(&self.avatar)
            + extra_weight(&self.extra)
    }
}

impl Weigh for Channel {
    fn weight(&self) -> usize {
        size_of::<Channel>() + string_weight(&self.name) + extra_weight(&self.extra)
    }
}

impl Weigh for VoiceState {
    fn weight(&self) -> usize {
        size_of::<VoiceState>() + self.session_id.len() + extra_weight(&self.extra)
    }
}

impl Weigh for Guild {
    fn weight(&self) -> usize {
        // members are estimated from their struct size alone, guilds get re-weighed on every
        // member add and walking all of them each time isn't worth it
        size_of::<Guild>()
            + self.name.len()
            + self.members.len() * (size_of::<Member>() + 16)
            + self.channels.iter().map(Weigh::weight).sum::<usize>()
            + self.emojis.len() * 96
            + self.roles.len() * 128
            + extra_weight(&self.extra)
    }
}
