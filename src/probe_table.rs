use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    slice,
};

use log::{debug, trace};

use crate::{
    InvalidArgument, Map, TableError,
    config::{
        DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, EXPANSION_RATE, MAX_LOAD_FACTOR, MIN_LOAD_FACTOR,
        TableConfig,
    },
    prime::next_prime,
};

/// An occupied slot of the table
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Slot {
    pub key: i32,
    pub value: i64,
}

/// Open addressing map from `i32` to `i64` with double hashing
///
/// The capacity is always prime, so every probe step is coprime with it
/// and a probe sequence visits every slot before repeating.
/// Growth happens one insert before the load factor would be reached,
/// which keeps at least one slot empty and lets every probe terminate.
///
/// There is no removal: without tombstones an emptied slot would cut
/// the probe sequences running through it.
#[derive(Debug, Clone)]
pub struct ProbeTable {
    slots: Vec<Option<Slot>>,
    load_factor: f32,
    size: usize,
}

/// Iterator over the occupied slots, in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: slice::Iter<'a, Option<Slot>>,
    remaining: usize,
}

impl Default for ProbeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeTable {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] slots and [`DEFAULT_LOAD_FACTOR`]
    pub fn new() -> Self {
        Self {
            slots: vec![None; DEFAULT_CAPACITY],
            load_factor: DEFAULT_LOAD_FACTOR,
            size: 0,
        }
    }

    /// Shorthand for `with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)`
    pub fn with_capacity(capacity: i64) -> Result<Self, TableError> {
        Self::from_config(TableConfig::default().with_capacity(capacity))
    }

    pub fn with_capacity_and_load_factor(
        capacity: i64,
        load_factor: f32,
    ) -> Result<Self, TableError> {
        Self::from_config(TableConfig {
            capacity,
            load_factor,
        })
    }

    /// Creates an empty table from `config`
    ///
    /// A capacity at or below [`DEFAULT_CAPACITY`] is raised to it,
    /// anything above is rounded up to the nearest prime.
    /// The load factor is clamped into `MIN_LOAD_FACTOR..=MAX_LOAD_FACTOR`.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if the capacity is not positive,
    /// or the load factor is not positive (or NaN)
    pub fn from_config(config: TableConfig) -> Result<Self, TableError> {
        let capacity = match config.capacity {
            c if c <= 0 => return Err(InvalidArgument::Capacity(c).into()),
            c => usize::try_from(c).map_err(|_| InvalidArgument::Capacity(c))?,
        };
        let capacity = if capacity <= DEFAULT_CAPACITY {
            DEFAULT_CAPACITY
        } else {
            // smallest prime >= capacity
            let prime = next_prime(capacity - 1);
            if prime != capacity {
                debug!(target: "probe_table::config", "capacity {} rounded up to prime {}", capacity, prime);
            }
            prime
        };

        let load_factor = match config.load_factor {
            lf if lf.is_nan() || lf <= 0.0 => return Err(InvalidArgument::LoadFactor(lf).into()),
            lf if lf > MAX_LOAD_FACTOR => {
                debug!(target: "probe_table::config", "load factor {} clamped to {}", lf, MAX_LOAD_FACTOR);
                MAX_LOAD_FACTOR
            }
            lf if lf < MIN_LOAD_FACTOR => {
                debug!(target: "probe_table::config", "load factor {} clamped to {}", lf, MIN_LOAD_FACTOR);
                MIN_LOAD_FACTOR
            }
            lf => lf,
        };

        Ok(Self {
            slots: vec![None; capacity],
            load_factor,
            size: 0,
        })
    }

    /// Returns the number of items in the table
    pub fn size(&self) -> usize {
        self.size
    }

    /// Same as [`ProbeTable::size`]
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots, always a prime
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Stores `value` under `key`, replacing the previous value if the key is present.
    ///
    /// Grows the table first if this insert would reach the load factor.
    /// Always returns `true`.
    pub fn put(&mut self, key: i32, value: i64) -> bool {
        if !self.has_room() {
            self.grow();
        }
        self.insert(Slot { key, value });

        true
    }

    /// Returns the value stored under `key`
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if the key was never inserted
    pub fn get(&self, key: i32) -> Result<i64, TableError> {
        match self.slots[self.probe(key)] {
            Some(slot) => Ok(slot.value),
            None => Err(TableError::KeyNotFound { key }),
        }
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.slots[self.probe(key)].is_some()
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.size,
        }
    }

    // [private]

    /// `key % capacity`, with the remainder negated for negative keys
    fn primary_hash(&self, key: i32) -> usize {
        let capacity = self.capacity() as i64;
        let rem = i64::from(key) % capacity;
        let hash = if key < 0 { -rem } else { rem };

        hash.rem_euclid(capacity) as usize
    }

    /// `5 - key % 5`, in `1..=5` for non-negative keys and `5..=9` for negative ones
    fn step(key: i32) -> usize {
        (5 - key % 5) as usize
    }

    /// Index of the slot holding `key`, or of the empty slot it would go in
    fn probe(&self, key: i32) -> usize {
        let capacity = self.capacity();
        let step = Self::step(key);
        let mut idx = self.primary_hash(key);

        while let Some(slot) = &self.slots[idx] {
            if slot.key == key {
                break;
            }
            trace!(target: "probe_table::probe", "key {} collides with {} at slot {}", key, slot.key, idx);
            idx = (idx + step) % capacity;
        }

        idx
    }

    /// Whether one more item stays below `capacity * load_factor`
    fn has_room(&self) -> bool {
        ((self.size + 1) as f32) < self.capacity() as f32 * self.load_factor
    }

    fn insert(&mut self, new: Slot) {
        let idx = self.probe(new.key);
        match &mut self.slots[idx] {
            Some(slot) => slot.value = new.value,
            empty @ None => {
                *empty = Some(new);
                self.size += 1;
            }
        }
    }

    /// Moves every item into a fresh slot array of the next prime
    /// above `EXPANSION_RATE * capacity`, in the old slot order
    fn grow(&mut self) {
        let new_cap = next_prime(self.capacity() * EXPANSION_RATE);
        debug!(
            target: "probe_table::grow",
            "growing from {} to {} slots, rehashing {} items",
            self.capacity(),
            new_cap,
            self.size
        );

        let old = std::mem::replace(&mut self.slots, vec![None; new_cap]);
        self.size = 0;
        for slot in old.into_iter().flatten() {
            self.insert(slot);
        }
        // dropping old slots
    }
}

impl Map for ProbeTable {
    fn put(&mut self, key: i32, value: i64) -> bool {
        ProbeTable::put(self, key, value)
    }

    fn get(&self, key: i32) -> Result<i64, TableError> {
        ProbeTable::get(self, key)
    }

    fn size(&self) -> usize {
        ProbeTable::size(self)
    }
}

/// Tables are equal only if their slot arrays are identical,
/// the same pairs stored at different positions compare unequal
impl PartialEq for ProbeTable {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.load_factor.to_bits() == other.load_factor.to_bits()
            && self.size == other.size
            && self.slots == other.slots
    }
}

impl Eq for ProbeTable {}

impl Hash for ProbeTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slots.hash(state);
    }
}

/// Renders `{k1=v1, k2=v2}` in slot order, an empty table is `{}`
impl fmt::Display for ProbeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

impl FromIterator<(i32, i64)> for ProbeTable {
    fn from_iter<I: IntoIterator<Item = (i32, i64)>>(iter: I) -> Self {
        let mut table = ProbeTable::new();
        table.extend(iter);
        table
    }
}

impl Extend<(i32, i64)> for ProbeTable {
    fn extend<I: IntoIterator<Item = (i32, i64)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a ProbeTable {
    type Item = (i32, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i32, i64);

    fn next(&mut self) -> Option<Self::Item> {
        let next = self
            .slots
            .find_map(|slot| slot.map(|s| (s.key, s.value)))?;
        self.remaining -= 1;

        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
