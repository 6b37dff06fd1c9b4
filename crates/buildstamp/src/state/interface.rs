use crate::Result;
use core::{borrow::Borrow, fmt};
use std::collections::BTreeMap;

/// The name of a scheduler; the key all persisted state is scoped by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SchedulerId(String);

impl SchedulerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchedulerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchedulerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SchedulerId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for SchedulerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A snapshot of one scheduler's persisted key/value state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SchedulerState(BTreeMap<String, String>);

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Sets `key`, returning the previous value if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A handle to an open transaction on a [`StateStore`].
///
/// Every read and write an allocator performs goes through one handle, and
/// the store guarantees the handle's writes become visible atomically (or
/// not at all) when the transaction ends.
pub trait StateTransaction {
    /// Reads `key` from `scheduler`'s state, observing this transaction's
    /// own earlier writes.
    ///
    /// # Errors
    /// - Returns [`crate::Error::Storage`] if the read cannot complete.
    fn get(&self, scheduler: &SchedulerId, key: &str) -> Result<Option<String>>;

    /// Writes `key` in `scheduler`'s state, overwriting any previous value.
    ///
    /// # Errors
    /// - Returns [`crate::Error::Storage`] if the write cannot complete.
    fn set(&mut self, scheduler: &SchedulerId, key: &str, value: &str) -> Result<()>;
}

/// A transactional key/value store scoped by scheduler.
///
/// ## Atomicity contract
/// - [`StateStore::transact`] runs its closure against a single
///   [`StateTransaction`]. If the closure returns `Ok`, all of its writes are
///   committed together; if it returns `Err`, none are.
/// - Read-modify-write sequences on the same scheduler key are
///   linearizable: two concurrent transactions can never both observe the
///   same prior value and both commit.
pub trait StateStore {
    /// Runs `f` inside one transaction.
    ///
    /// # Errors
    /// - Returns whatever `f` returned (the transaction is rolled back)
    /// - Returns [`crate::Error::Storage`] or [`crate::Error::LockPoisoned`]
    ///   if the transaction cannot be opened or committed.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn StateTransaction) -> Result<T>;

    /// Returns a committed snapshot of `scheduler`'s state.
    ///
    /// # Errors
    /// - Same as [`StateStore::transact`].
    fn state(&self, scheduler: &SchedulerId) -> Result<SchedulerState>;
}
