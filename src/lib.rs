//! chained-hashmap: a single-threaded, separate-chaining hash map whose
//! buckets are load-factor-managed vectors.
//!
//! Internal Design:
//!
//! Summary
//! - Two layers, each with its own resize policy:
//!   - Vector<T>: dense owned storage. Grows by the growth factor when a
//!     push starts at or above the high-water mark; shrinks when an erase
//!     starts at or below the low-water mark, never under its initial
//!     capacity.
//!   - ChainedHashMap<K, V, S>: a power-of-two array of `Vector<Pair<K, V>>`
//!     buckets. Rebuilds the whole bucket array (rehash) on the same
//!     thresholds, measured as `len / bucket count`.
//! - Pair<K, V> is the stored entry; it compares by key.
//!
//! Constraints
//! - Single-threaded; callers serialize access themselves.
//! - Unique keys; duplicate inserts fail with `Error::DuplicateKey` and leave
//!   the map unchanged, capacity included.
//! - Bucket of a key is `hash(key) & (capacity - 1)` under the current
//!   capacity. `len` always equals the sum of bucket lengths.
//!
//! Ownership
//! - `insert` stores a clone of the caller's pair; the caller's original is
//!   never referenced afterwards.
//! - Copy, compare and free are `Clone`, `PartialEq` and `Drop`. Dropping the
//!   map drops every bucket, which drops every pair.
//!
//! Rehashing
//! - A rehash stages a complete new bucket array built from copies of the
//!   stored pairs, then swaps it in. If staging fails (allocation), the
//!   staged copies are dropped and the map keeps its old buckets. The same
//!   holds when a `Clone` panics partway through.
//! - A growing insert copies the incoming pair first and places it in the
//!   staged array, so the new bucket count commits together with the entry.
//! - Insert checks the grow threshold *after* rejecting duplicates and
//!   *before* adding. Erase checks the shrink threshold *before* looking the
//!   key up, so the entry being removed still counts toward the load.
//!
//! Notes and non-goals
//! - No ordered iteration; `iter` walks buckets then slots, and that order
//!   changes across rehashes.
//! - Hash quality is the `BuildHasher`'s business. The default is hashbrown's
//!   `DefaultHashBuilder`.
//! - Failures are reported through `Result`; nothing is retried internally.

pub mod config;
pub mod error;
pub mod hash_map;
mod hash_map_proptest;
pub mod pair;
pub mod vector;

// Public surface
pub use config::GrowthPolicy;
pub use error::{Error, Result};
pub use hash_map::ChainedHashMap;
pub use pair::Pair;
pub use vector::Vector;
