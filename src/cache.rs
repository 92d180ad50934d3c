use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::geo::Region;
use crate::map::GridLayout;

/// Hit/miss counters of one cache
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct Slots<K, V> {
    /// Most recently used first
    entries: VecDeque<(K, Arc<V>)>,
    stats: CacheStats,
}

/// A small most-recent-wins cache guarded by one lock.
///
/// Lookups and inserts take the lock for the whole check-then-update, so two
/// threads never race to fill the same slot. Values are shared as `Arc` and
/// replaced whole, never mutated in place.
pub struct BoundedCache<K, V> {
    capacity: usize,
    slots: Mutex<Slots<K, V>>,
}

impl<K: PartialEq, V> BoundedCache<K, V> {
    /// A capacity of zero caches nothing
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Mutex::new(Slots {
                entries: VecDeque::with_capacity(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    // A panic while holding the lock cannot leave a half-written entry
    // behind, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Slots<K, V>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut slots = self.lock();
        let found = slots.entries.iter().position(|(k, _)| k == key);
        match found {
            Some(idx) => {
                slots.stats.hits += 1;
                let entry = slots.entries.remove(idx)?;
                let value = Arc::clone(&entry.1);
                slots.entries.push_front(entry);
                Some(value)
            }
            None => {
                slots.stats.misses += 1;
                None
            }
        }
    }

    pub fn set(&self, key: K, value: Arc<V>) {
        let mut slots = self.lock();
        Self::store(&mut slots, self.capacity, key, value);
    }

    fn store(slots: &mut Slots<K, V>, capacity: usize, key: K, value: Arc<V>) {
        if capacity == 0 {
            return;
        }
        slots.entries.retain(|(k, _)| *k != key);
        slots.entries.push_front((key, value));
        slots.entries.truncate(capacity);
    }

    /// Return the cached value for `key`, or build, store and return it.
    /// The lock is held while `build` runs.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        let mut slots = self.lock();
        if let Some(idx) = slots.entries.iter().position(|(k, _)| *k == key) {
            slots.stats.hits += 1;
            if let Some(entry) = slots.entries.remove(idx) {
                let value = Arc::clone(&entry.1);
                slots.entries.push_front(entry);
                return Ok(value);
            }
        }

        slots.stats.misses += 1;
        let value = Arc::new(build()?);
        Self::store(&mut slots, self.capacity, key, Arc::clone(&value));
        Ok(value)
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

/// Identity of a feature selection for the prepared-geometry slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeatureSetKey {
    World,
    /// Sorted, de-duplicated ids; the fingerprint is compared first
    Subset { fingerprint: u64, ids: Arc<[String]> },
}

/// Everything that influences a sampled point set, compared exactly.
///
/// Floats are stored by bit pattern. Country ids are sorted and de-duplicated,
/// so selection order never causes a miss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapKey {
    height: u64,
    width: u64,
    countries: Vec<String>,
    region: Option<[u64; 4]>,
    rows: usize,
    columns: usize,
    radius: u64,
    layout: GridLayout,
}

impl MapKey {
    #[allow(clippy::too_many_arguments)]
    pub fn new<S: AsRef<str>>(
        height: f64,
        width: f64,
        countries: &[S],
        region: Option<&Region>,
        rows: usize,
        columns: usize,
        radius: f64,
        layout: GridLayout,
    ) -> Self {
        let mut countries: Vec<String> = countries.iter().map(|c| c.as_ref().to_string()).collect();
        countries.sort();
        countries.dedup();

        Self {
            height: height.to_bits(),
            width: width.to_bits(),
            countries,
            region: region.map(|r| {
                [
                    r.lat_min.to_bits(),
                    r.lat_max.to_bits(),
                    r.lng_min.to_bits(),
                    r.lng_max.to_bits(),
                ]
            }),
            rows,
            columns,
            radius: radius.to_bits(),
            layout,
        }
    }
}
