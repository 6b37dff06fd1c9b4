use thiserror::Error;

/// A result type defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `buildstamp` can emit.
///
/// Name normalization is total and never produces one of these. The
/// allocators surface every failure to the calling scheduler, which owns the
/// retry or abort decision.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The persistence store could not complete a read or a write.
    #[error("state store failure for scheduler `{scheduler}`: {reason}")]
    Storage { scheduler: String, reason: String },

    /// The in-memory store's lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is never produced.
    #[error("state store lock poisoned")]
    LockPoisoned,

    /// A persisted value exists but cannot be interpreted.
    #[error("corrupt scheduler state: `{key}` = {value:?}")]
    CorruptState { key: String, value: String },

    /// The clock could not produce a usable wall-clock time.
    #[error("clock unavailable: {reason}")]
    Clock { reason: String },

    /// The entropy source failed.
    #[error("randomness source failed: {reason}")]
    Randomness { reason: String },

    /// A configuration value was rejected during validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Builds a [`Error::Storage`] for `scheduler`; handy for external
    /// [`StateStore`](crate::StateStore) implementations.
    pub fn storage(scheduler: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Storage {
            scheduler: scheduler.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn clock(reason: impl Into<String>) -> Self {
        Self::Clock {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::state::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
