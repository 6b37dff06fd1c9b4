use crate::{
    Result, SchedulerId, SchedulerState, StateStore, StateTransaction, state::Mutex,
};
use std::collections::HashMap;
#[cfg(feature = "tracing")]
use tracing::trace;

/// An in-process [`StateStore`].
///
/// All transactions are serialized behind one mutex, which trivially makes
/// every read-modify-write linearizable. Writes are buffered in the
/// transaction and applied only when the closure returns `Ok`.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Atomic commit / rollback
/// - ❌ Not durable (state is lost with the process)
///
/// ## Recommended When
/// - Testing scheduler callbacks
/// - A single process owns all schedulers and restarts may reset state
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    schedulers: Mutex<HashMap<SchedulerId, SchedulerState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of schedulers with committed state.
    ///
    /// # Errors
    /// - Returns [`crate::Error::LockPoisoned`] if the lock was poisoned.
    pub fn scheduler_count(&self) -> Result<usize> {
        #[cfg(feature = "parking-lot")]
        let schedulers = self.schedulers.lock();
        #[cfg(not(feature = "parking-lot"))]
        let schedulers = self.schedulers.lock()?;

        Ok(schedulers.len())
    }
}

struct MemoryTransaction<'a> {
    committed: &'a HashMap<SchedulerId, SchedulerState>,
    pending: HashMap<SchedulerId, SchedulerState>,
}

impl StateTransaction for MemoryTransaction<'_> {
    fn get(&self, scheduler: &SchedulerId, key: &str) -> Result<Option<String>> {
        let value = self
            .pending
            .get(scheduler)
            .and_then(|state| state.get(key))
            .or_else(|| self.committed.get(scheduler).and_then(|state| state.get(key)));
        Ok(value.map(str::to_owned))
    }

    fn set(&mut self, scheduler: &SchedulerId, key: &str, value: &str) -> Result<()> {
        self.pending
            .entry(scheduler.clone())
            .or_default()
            .set(key, value);
        Ok(())
    }
}

impl StateStore for MemoryStateStore {
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn StateTransaction) -> Result<T>,
    {
        #[cfg(feature = "parking-lot")]
        let mut schedulers = self.schedulers.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut schedulers = self.schedulers.lock()?;

        let mut txn = MemoryTransaction {
            committed: &schedulers,
            pending: HashMap::new(),
        };
        let value = f(&mut txn)?;
        let MemoryTransaction { pending, .. } = txn;

        #[cfg(feature = "tracing")]
        trace!(schedulers = pending.len(), "committing transaction");

        for (scheduler, writes) in pending {
            let state = schedulers.entry(scheduler).or_default();
            for (key, value) in writes.iter() {
                state.set(key, value);
            }
        }
        Ok(value)
    }

    fn state(&self, scheduler: &SchedulerId) -> Result<SchedulerState> {
        #[cfg(feature = "parking-lot")]
        let schedulers = self.schedulers.lock();
        #[cfg(not(feature = "parking-lot"))]
        let schedulers = self.schedulers.lock()?;

        Ok(schedulers.get(scheduler).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn committed_writes_are_visible() {
        let store = MemoryStateStore::new();
        let s = SchedulerId::from("s");

        store
            .transact(|txn| txn.set(&s, "last_buildid", "19700102000058"))
            .unwrap();

        let state = store.state(&s).unwrap();
        assert_eq!(state.get("last_buildid"), Some("19700102000058"));
        assert_eq!(store.scheduler_count().unwrap(), 1);
    }

    #[test]
    fn transaction_reads_its_own_writes() {
        let store = MemoryStateStore::new();
        let s = SchedulerId::from("s");

        let seen = store
            .transact(|txn| {
                txn.set(&s, "k", "v1")?;
                txn.set(&s, "k", "v2")?;
                txn.get(&s, "k")
            })
            .unwrap();
        assert_eq!(seen.as_deref(), Some("v2"));
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let store = MemoryStateStore::new();
        let s = SchedulerId::from("s");
        store.transact(|txn| txn.set(&s, "k", "old")).unwrap();

        let err = store
            .transact(|txn| -> Result<()> {
                txn.set(&s, "k", "new")?;
                Err(Error::storage("s", "simulated failure"))
            })
            .unwrap_err();

        assert!(matches!(err, Error::Storage { .. }));
        assert_eq!(store.state(&s).unwrap().get("k"), Some("old"));
    }

    #[test]
    fn schedulers_are_isolated() {
        let store = MemoryStateStore::new();
        let a = SchedulerId::from("a");
        let b = SchedulerId::from("b");

        store.transact(|txn| txn.set(&a, "k", "a")).unwrap();
        store.transact(|txn| txn.set(&b, "k", "b")).unwrap();

        assert_eq!(store.state(&a).unwrap().get("k"), Some("a"));
        assert_eq!(store.state(&b).unwrap().get("k"), Some("b"));
        assert!(store.state(&SchedulerId::from("c")).unwrap().is_empty());
    }
}
