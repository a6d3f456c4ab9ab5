/// Smallest capacity a table is ever created with
pub const DEFAULT_CAPACITY: usize = 17;
pub const DEFAULT_LOAD_FACTOR: f32 = 0.5;
pub const MIN_LOAD_FACTOR: f32 = 0.3;
pub const MAX_LOAD_FACTOR: f32 = 0.7;
/// Growth multiplier, the new capacity is the next prime above `capacity * EXPANSION_RATE`
pub const EXPANSION_RATE: usize = 2;

/// Construction parameters of a [`ProbeTable`](crate::ProbeTable)
///
/// The values are taken as requested and only validated by
/// [`ProbeTable::from_config`](crate::ProbeTable::from_config),
/// which also rounds the capacity and clamps the load factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub capacity: i64,
    pub load_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY as i64,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let c = TableConfig::default();
        assert_eq!(c.capacity, 17);
        assert_eq!(c.load_factor, 0.5);
    }

    #[test]
    fn builder() {
        let c = TableConfig::default()
            .with_capacity(100)
            .with_load_factor(0.6);

        assert_eq!(
            c,
            TableConfig {
                capacity: 100,
                load_factor: 0.6
            }
        );
    }
}
