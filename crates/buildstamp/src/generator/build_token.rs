use crate::{
    BuildToken, DEFAULT_BUILDUID_PROPERTY, GeneratorConfig, Properties, PropertyGenerator,
    RandSource, Result, SchedulerId, StateTransaction, TriggerEvent,
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Property source recorded for tokens set by [`BuildTokenGenerator`].
pub const BUILD_TOKEN_SOURCE: &str = "BuildTokenGenerator";

/// Hands out a fresh random [`BuildToken`] per triggered build.
///
/// Tokens depend on neither time nor persisted state: the transaction handle
/// is accepted to fit the scheduler callback shape but never touched.
///
/// ## Features
/// - ✅ Thread-safe (when the random source is)
/// - ✅ Probabilistically unique (no coordination required)
/// - ❌ No ordering
///
/// # Example
/// ```
/// use buildstamp::{
///     BuildTokenGenerator, MemoryStateStore, PropertyGenerator, SchedulerId, ThreadRandom,
/// };
///
/// let store = MemoryStateStore::new();
/// let generator = BuildTokenGenerator::new(ThreadRandom);
/// let props = generator
///     .generate_in(&store, &SchedulerId::from("nightly"), None)
///     .unwrap();
/// assert_eq!(props.get("builduid").unwrap().len(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct BuildTokenGenerator<R>
where
    R: RandSource<BuildToken>,
{
    rng: R,
    property: String,
}

impl<R> BuildTokenGenerator<R>
where
    R: RandSource<BuildToken>,
{
    /// Creates a generator publishing under the default `builduid` property.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            property: DEFAULT_BUILDUID_PROPERTY.to_string(),
        }
    }

    /// Creates a generator from a validated [`GeneratorConfig`].
    ///
    /// # Errors
    /// - Returns [`crate::Error::InvalidConfig`] if the configuration is
    ///   invalid.
    pub fn from_config(config: &GeneratorConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng,
            property: config.builduid_property.clone(),
        })
    }

    /// Returns the name of the property tokens are published under.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Draws a new token.
    ///
    /// # Errors
    /// - Returns [`crate::Error::Randomness`] if the random source failed.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn allocate(&self) -> Result<BuildToken> {
        self.rng.rand()
    }
}

impl<R> PropertyGenerator for BuildTokenGenerator<R>
where
    R: RandSource<BuildToken>,
{
    fn generate(
        &self,
        _scheduler: &SchedulerId,
        _txn: &mut dyn StateTransaction,
        _event: Option<&TriggerEvent>,
    ) -> Result<Properties> {
        let token = self.allocate()?;
        let mut props = Properties::new();
        props.set(self.property.as_str(), token, BUILD_TOKEN_SOURCE);
        Ok(props)
    }
}
