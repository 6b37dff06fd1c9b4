use crate::{Properties, Result, SchedulerId, StateStore, StateTransaction};

/// The event that caused a scheduler to trigger a build.
///
/// Generators receive it for context; neither built-in generator inspects
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerEvent {
    /// Source stamp the build was triggered for, if any.
    pub sourcestamp_id: Option<u64>,
    /// Free-form reason reported by the scheduler.
    pub reason: String,
}

/// A property-generation callback invoked by a scheduler once per triggered
/// build.
///
/// Implementations read and write scheduler state only through `txn`, so
/// that their effects commit or roll back together with the scheduler's own
/// transaction.
pub trait PropertyGenerator {
    /// Computes the properties to attach to the triggered build.
    ///
    /// # Errors
    /// - Propagates storage, clock, and randomness failures unchanged; the
    ///   caller decides whether to retry or abort.
    fn generate(
        &self,
        scheduler: &SchedulerId,
        txn: &mut dyn StateTransaction,
        event: Option<&TriggerEvent>,
    ) -> Result<Properties>;

    /// Runs [`PropertyGenerator::generate`] in a transaction of its own on
    /// `store`.
    ///
    /// # Errors
    /// - Same as [`PropertyGenerator::generate`] and
    ///   [`StateStore::transact`].
    fn generate_in<S>(
        &self,
        store: &S,
        scheduler: &SchedulerId,
        event: Option<&TriggerEvent>,
    ) -> Result<Properties>
    where
        S: StateStore,
        Self: Sized,
    {
        store.transact(|txn| self.generate(scheduler, txn, event))
    }
}

impl<G: PropertyGenerator + ?Sized> PropertyGenerator for Box<G> {
    fn generate(
        &self,
        scheduler: &SchedulerId,
        txn: &mut dyn StateTransaction,
        event: Option<&TriggerEvent>,
    ) -> Result<Properties> {
        (**self).generate(scheduler, txn, event)
    }
}
