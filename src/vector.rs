//! Vector: dense, owned storage with threshold-driven growth and shrink.
//!
//! `Vector<T>` tracks its own logical `capacity` and keeps the backing
//! `Vec` reserved to at least that many slots. Capacity only moves by the
//! policy's growth factor, and only when a threshold is crossed:
//! - `push`/`push_back` grow first when `len / capacity >= max_load_factor`;
//! - `erase`/`remove` shrink first when `len / capacity <= min_load_factor`,
//!   never below `initial_capacity`.
//!
//! Copy, compare and free are `Clone`, `PartialEq` and `Drop` of `T`.

use crate::config::GrowthPolicy;
use crate::error::{Error, Result};
use core::fmt;

pub struct Vector<T> {
    data: Vec<T>,
    capacity: usize,
    policy: GrowthPolicy,
}

impl<T> Vector<T> {
    /// An empty vector with `VECTOR_INITIAL_CAPACITY` slots reserved.
    pub fn new() -> Self {
        let policy = GrowthPolicy::VECTOR;
        Self {
            data: Vec::with_capacity(policy.initial_capacity),
            capacity: policy.initial_capacity,
            policy,
        }
    }

    /// Fails with `InvalidConfig` for a policy that `validate` rejects, or
    /// `OutOfMemory` if the initial slots cannot be reserved.
    pub fn with_policy(policy: GrowthPolicy) -> Result<Self> {
        policy.validate()?;
        let mut data = Vec::new();
        data.try_reserve_exact(policy.initial_capacity)
            .map_err(|e| Error::from_reserve(policy.initial_capacity, e))?;
        Ok(Self {
            data,
            capacity: policy.initial_capacity,
            policy,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical slot count; the backing storage reserves at least this many.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// `len / capacity`. Capacity is never zero once constructed.
    pub fn load_factor(&self) -> f64 {
        GrowthPolicy::load_factor(self.len(), self.capacity)
    }

    /// The stored element at `index`, not a copy.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Index of the first element matching `pred`.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.data.iter().position(pred)
    }

    /// Appends `value`, moving it in.
    pub fn push(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        self.data.push(value);
        Ok(())
    }

    /// Drops the element at `index` and closes the gap.
    pub fn erase(&mut self, index: usize) -> Result<()> {
        self.remove(index).map(drop)
    }

    /// Takes the element at `index` out, shifting later elements left by one.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(Error::out_of_bounds(index, len));
        }
        if self.policy.should_shrink(len, self.capacity) {
            let shrunk = self.policy.shrunk(self.capacity);
            if shrunk < self.capacity {
                log::trace!("vector shrink {} -> {} (len {})", self.capacity, shrunk, len);
                self.data.shrink_to(shrunk);
                self.capacity = shrunk;
            }
        }
        Ok(self.data.remove(index))
    }

    /// Drops every element front to back. Capacity steps down each time
    /// the remaining occupancy falls under the low-water mark.
    pub fn clear(&mut self) {
        let mut remaining = self.data.len();
        let mut capacity = self.capacity;
        for elem in self.data.drain(..) {
            drop(elem);
            remaining -= 1;
            if GrowthPolicy::load_factor(remaining, capacity) < self.policy.min_load_factor {
                capacity = self.policy.shrunk(capacity);
            }
        }
        if capacity < self.capacity {
            log::trace!("vector clear shrink {} -> {}", self.capacity, capacity);
            self.data.shrink_to(capacity);
            self.capacity = capacity;
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn reserve_one(&mut self) -> Result<()> {
        let len = self.len();
        if self.policy.should_grow(len, self.capacity) {
            let grown = self.policy.grown(self.capacity)?;
            self.data
                .try_reserve_exact(grown - len)
                .map_err(|e| Error::from_reserve(grown, e))?;
            log::trace!("vector grow {} -> {} (len {})", self.capacity, grown, len);
            self.capacity = grown;
        }
        Ok(())
    }
}

impl<T: Clone> Vector<T> {
    /// Appends a deep copy of `value`; the caller keeps the original.
    ///
    /// The copy is made before any growth, so a panicking `Clone` leaves
    /// length and capacity as they were.
    pub fn push_back(&mut self, value: &T) -> Result<()> {
        let copy = value.clone();
        self.push(copy)
    }
}

impl<T: PartialEq> Vector<T> {
    /// Lowest index holding an element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize> {
        self.position(|e| e == value)
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend(self.data.iter().cloned());
        Self {
            data,
            capacity: self.capacity,
            policy: self.policy,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("data", &self.data)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
