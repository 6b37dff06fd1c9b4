use crate::{
    BuildId, DEFAULT_BUILDID_PROPERTY, DEFAULT_STATE_KEY, Error, GeneratorConfig, Properties,
    PropertyGenerator, Result, SchedulerId, StateTransaction, TimeSource, TriggerEvent,
};
#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

/// Property source recorded for identifiers set by [`BuildIdGenerator`].
pub const BUILD_ID_SOURCE: &str = "BuildIdGenerator";

/// Allocates wall-clock build identifiers that strictly increase per
/// scheduler.
///
/// Each allocation reads the scheduler's last identifier, and returns
/// whichever is later of:
/// - the current time, formatted `YYYYMMDDHHMMSS` in the clock's zone
/// - the last identifier plus one second
///
/// so a stalled or regressing clock borrows seconds from the future instead
/// of repeating or reordering identifiers. The new identifier is written back
/// in the same transaction; the generator itself holds no state between
/// calls.
///
/// ## Features
/// - ✅ Thread-safe (when the clock is)
/// - ✅ Strictly increasing per scheduler, across restarts
/// - ✅ Human-readable, lexically sortable
///
/// # Example
/// ```
/// use buildstamp::{
///     BuildIdGenerator, MemoryStateStore, PropertyGenerator, SchedulerId, StateStore,
///     SystemClock,
/// };
///
/// let store = MemoryStateStore::new();
/// let scheduler = SchedulerId::from("nightly");
/// let generator = BuildIdGenerator::new(SystemClock::utc());
///
/// let first = generator.generate_in(&store, &scheduler, None).unwrap();
/// let second = generator.generate_in(&store, &scheduler, None).unwrap();
/// assert!(first.get("buildid").unwrap() < second.get("buildid").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct BuildIdGenerator<T>
where
    T: TimeSource,
{
    time: T,
    property: String,
    state_key: String,
}

impl<T> BuildIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator using the default property name (`buildid`) and
    /// state key (`last_buildid`).
    pub fn new(time: T) -> Self {
        Self {
            time,
            property: DEFAULT_BUILDID_PROPERTY.to_string(),
            state_key: DEFAULT_STATE_KEY.to_string(),
        }
    }

    /// Creates a generator from a validated [`GeneratorConfig`].
    ///
    /// # Errors
    /// - Returns [`Error::InvalidConfig`] if the configuration is invalid.
    pub fn from_config(config: &GeneratorConfig, time: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            time,
            property: config.buildid_property.clone(),
            state_key: config.state_key.clone(),
        })
    }

    /// Returns the name of the property identifiers are published under.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Returns the scheduler-state key identifiers are persisted under.
    pub fn state_key(&self) -> &str {
        &self.state_key
    }

    /// Allocates the next identifier for `scheduler` within `txn`.
    ///
    /// # Errors
    /// - [`Error::Storage`]: the state read or write failed
    /// - [`Error::CorruptState`]: the persisted identifier is unparseable
    /// - [`Error::Clock`]: the clock failed, or the next identifier would
    ///   leave the representable calendar range
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, txn)))]
    pub fn allocate(
        &self,
        scheduler: &SchedulerId,
        txn: &mut dyn StateTransaction,
    ) -> Result<BuildId> {
        let last = self.last_build_id(scheduler, &*txn)?;
        let now = BuildId::from_offset_datetime(self.time.now()?);
        let next = now.max(last.successor()?);

        #[cfg(feature = "tracing")]
        if next != now {
            debug!(%scheduler, %last, %now, %next, "clock did not advance past last build id");
        }

        txn.set(scheduler, &self.state_key, &next.to_string())?;
        Ok(next)
    }

    fn last_build_id(
        &self,
        scheduler: &SchedulerId,
        txn: &dyn StateTransaction,
    ) -> Result<BuildId> {
        match txn.get(scheduler, &self.state_key)? {
            None => Ok(BuildId::EPOCH),
            Some(value) if value.is_empty() => Ok(BuildId::EPOCH),
            Some(value) => match value.parse() {
                Ok(id) => Ok(id),
                Err(_) => Err(Error::CorruptState {
                    key: self.state_key.clone(),
                    value,
                }),
            },
        }
    }
}

impl<T> PropertyGenerator for BuildIdGenerator<T>
where
    T: TimeSource,
{
    fn generate(
        &self,
        scheduler: &SchedulerId,
        txn: &mut dyn StateTransaction,
        _event: Option<&TriggerEvent>,
    ) -> Result<Properties> {
        let id = self.allocate(scheduler, txn)?;
        let mut props = Properties::new();
        props.set(self.property.as_str(), id.to_string(), BUILD_ID_SOURCE);
        Ok(props)
    }
}
