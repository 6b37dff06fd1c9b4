use crate::{Properties, PropertyGenerator, Result, SchedulerId, StateTransaction, TriggerEvent};

/// Runs several generators inside one transaction and merges their
/// properties.
///
/// Generators run in insertion order; when two set the same property the
/// later one wins. The first error aborts the chain, and since every
/// generator shares the caller's transaction, nothing any of them wrote is
/// committed.
///
/// # Example
/// ```
/// use buildstamp::{
///     BuildIdGenerator, BuildTokenGenerator, GeneratorChain, MemoryStateStore,
///     PropertyGenerator, SchedulerId, SystemClock, ThreadRandom,
/// };
///
/// let chain = GeneratorChain::new()
///     .with(BuildIdGenerator::new(SystemClock::utc()))
///     .with(BuildTokenGenerator::new(ThreadRandom));
///
/// let store = MemoryStateStore::new();
/// let props = chain
///     .generate_in(&store, &SchedulerId::from("release"), None)
///     .unwrap();
/// assert!(props.contains("buildid"));
/// assert!(props.contains("builduid"));
///
/// for (name, property) in props.iter() {
///     println!("{name} = {} (from {})", property.value, property.source);
/// }
/// ```
#[derive(Default)]
pub struct GeneratorChain {
    generators: Vec<Box<dyn PropertyGenerator + Send + Sync>>,
}

impl GeneratorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `generator` to the chain.
    pub fn with<G>(mut self, generator: G) -> Self
    where
        G: PropertyGenerator + Send + Sync + 'static,
    {
        self.push(generator);
        self
    }

    pub fn push<G>(&mut self, generator: G)
    where
        G: PropertyGenerator + Send + Sync + 'static,
    {
        self.generators.push(Box::new(generator));
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl PropertyGenerator for GeneratorChain {
    fn generate(
        &self,
        scheduler: &SchedulerId,
        txn: &mut dyn StateTransaction,
        event: Option<&TriggerEvent>,
    ) -> Result<Properties> {
        let mut props = Properties::new();
        for generator in &self.generators {
            props.update(generator.generate(scheduler, txn, event)?);
        }
        Ok(props)
    }
}
