//! Growth policy: the capacity constants and load-factor thresholds that
//! drive resizing of both the vector and the bucket array.
//!
//! Both structures check the thresholds *before* the mutating step, so the
//! occupancy after the operation lands inside `(min_load_factor, max_load_factor)`
//! except at the capacity floor.

use crate::error::{Error, Result};

/// Slots allocated by a fresh `Vector`.
pub const VECTOR_INITIAL_CAPACITY: usize = 16;

/// Buckets allocated by a fresh `ChainedHashMap`. Also the bucket floor.
pub const HASH_MAP_INITIAL_CAPACITY: usize = 8;

pub const GROWTH_FACTOR: usize = 2;

/// Grow when `len / capacity` reaches this before an insert.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// Shrink when `len / capacity` is at or below this before an erase.
pub const MIN_LOAD_FACTOR: f64 = 0.25;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GrowthPolicy {
    /// Capacity at construction; capacity never shrinks below it.
    pub initial_capacity: usize,
    pub growth_factor: usize,
    pub max_load_factor: f64,
    pub min_load_factor: f64,
}

impl GrowthPolicy {
    pub const VECTOR: GrowthPolicy = GrowthPolicy {
        initial_capacity: VECTOR_INITIAL_CAPACITY,
        growth_factor: GROWTH_FACTOR,
        max_load_factor: MAX_LOAD_FACTOR,
        min_load_factor: MIN_LOAD_FACTOR,
    };

    pub const HASH_MAP: GrowthPolicy = GrowthPolicy {
        initial_capacity: HASH_MAP_INITIAL_CAPACITY,
        growth_factor: GROWTH_FACTOR,
        max_load_factor: MAX_LOAD_FACTOR,
        min_load_factor: MIN_LOAD_FACTOR,
    };

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    pub fn with_load_factors(mut self, min_load_factor: f64, max_load_factor: f64) -> Self {
        self.min_load_factor = min_load_factor;
        self.max_load_factor = max_load_factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(Error::invalid_config("initial capacity must be non-zero"));
        }
        if self.growth_factor < 2 {
            return Err(Error::invalid_config("growth factor must be at least 2"));
        }
        let in_unit = |x: f64| x > 0.0 && x <= 1.0;
        if !in_unit(self.min_load_factor) || !in_unit(self.max_load_factor) {
            return Err(Error::invalid_config("load factors must lie in (0, 1]"));
        }
        if self.min_load_factor >= self.max_load_factor {
            return Err(Error::invalid_config(
                "min load factor must be below max load factor",
            ));
        }
        // A shrink must leave room for the remaining entries without
        // immediately re-arming the grow threshold.
        if self.min_load_factor * self.growth_factor as f64 >= self.max_load_factor {
            return Err(Error::invalid_config(
                "min load factor times growth factor must stay below max load factor",
            ));
        }
        Ok(())
    }

    /// Bucket indices are computed with a mask, so every reachable
    /// capacity has to stay a power of two.
    pub fn validate_for_hash_map(&self) -> Result<()> {
        self.validate()?;
        if !self.initial_capacity.is_power_of_two() {
            return Err(Error::invalid_config(
                "bucket count must be a power of two",
            ));
        }
        if !self.growth_factor.is_power_of_two() {
            return Err(Error::invalid_config(
                "bucket growth factor must be a power of two",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn load_factor(len: usize, capacity: usize) -> f64 {
        len as f64 / capacity as f64
    }

    #[inline]
    pub(crate) fn should_grow(&self, len: usize, capacity: usize) -> bool {
        Self::load_factor(len, capacity) >= self.max_load_factor
    }

    #[inline]
    pub(crate) fn should_shrink(&self, len: usize, capacity: usize) -> bool {
        Self::load_factor(len, capacity) <= self.min_load_factor
    }

    pub(crate) fn grown(&self, capacity: usize) -> Result<usize> {
        capacity
            .checked_mul(self.growth_factor)
            .ok_or_else(|| Error::out_of_memory(usize::MAX))
    }

    pub(crate) fn shrunk(&self, capacity: usize) -> usize {
        (capacity / self.growth_factor).max(self.initial_capacity)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::VECTOR
    }
}
