//! Error type shared by `Vector` and `ChainedHashMap`.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Insert of a key that is already stored.
    #[error("duplicate key")]
    DuplicateKey,

    /// Lookup or erase of a key that is not stored.
    #[error("key not found")]
    KeyNotFound,

    /// Positional access past the occupied prefix of a vector.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Backing storage could not be grown.
    #[error("allocation failed: requested {requested} slots")]
    OutOfMemory { requested: usize },

    /// A `GrowthPolicy` that cannot keep the load-factor band.
    #[error("invalid growth policy: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    pub fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn from_reserve(requested: usize, _e: TryReserveError) -> Self {
        Self::out_of_memory(requested)
    }
}

pub type Result<T> = core::result::Result<T, Error>;
