use thiserror::Error;

/// Boundary errors. The mixing core itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("hash length {length} exceeds buffer of {available} bytes")]
    LengthOutOfBounds { length: usize, available: usize },

    #[error("hasher declared {declared} bytes but {written} were written")]
    LengthMismatch { declared: u64, written: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
