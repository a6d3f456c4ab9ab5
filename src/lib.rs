mod config;
mod prime;
mod probe_table;

pub use config::{
    DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, EXPANSION_RATE, MAX_LOAD_FACTOR, MIN_LOAD_FACTOR,
    TableConfig,
};
pub use prime::{is_prime, next_prime};
pub use probe_table::{Iter, ProbeTable, Slot};

use thiserror::Error;

/// Integer map interface, `i32` keys to `i64` values
pub trait Map {
    /// Stores `value` under `key`, overwriting any previous value.
    /// Returns `true` once the pair is stored
    fn put(&mut self, key: i32, value: i64) -> bool;

    /// Returns the value stored under `key`
    fn get(&self, key: i32) -> Result<i64, TableError>;

    /// Number of distinct keys stored
    fn size(&self) -> usize;
}

#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    /// Rejected constructor input, no table is produced
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The probe sequence hit an empty slot before finding the key
    #[error("no item with key: {key}")]
    KeyNotFound { key: i32 },
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidArgument {
    #[error("capacity should be a positive number, got: {0}")]
    Capacity(i64),

    #[error("load factor should be a positive number, got: {0}")]
    LoadFactor(f32),
}
