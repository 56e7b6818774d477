//! Ordered registry of blamer factories

use crate::factory::BlamerFactory;
use std::fmt;
use std::sync::Arc;

/// Supplies the registered factories to the resolver.
///
/// Implementations must return factories in a stable order and must not fail;
/// an empty list is a normal answer.
pub trait FactorySource: Send + Sync {
    fn list_factories(&self) -> Vec<Arc<dyn BlamerFactory>>;
}

/// Registry for blamer factories
///
/// Factories are kept in registration order. Registering a second factory
/// under an existing name appends it; the earlier one still wins during
/// resolution.
#[derive(Debug, Clone, Default)]
pub struct BlamerRegistry {
    factories: Vec<Arc<dyn BlamerFactory>>,
}

impl BlamerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a factory
    pub fn register<F: BlamerFactory + 'static>(&mut self, factory: F) {
        self.register_shared(Arc::new(factory));
    }

    /// Append an already shared factory
    pub fn register_shared(&mut self, factory: Arc<dyn BlamerFactory>) {
        tracing::debug!(factory = factory.name(), "registered blamer factory");
        self.factories.push(factory);
    }

    /// Registered factories in registration order
    pub fn factories(&self) -> &[Arc<dyn BlamerFactory>] {
        &self.factories
    }

    /// Factory names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.name()).collect()
    }

    /// Check if a factory is registered
    pub fn has_factory(&self, name: &str) -> bool {
        self.factories.iter().any(|f| f.name() == name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl FactorySource for BlamerRegistry {
    fn list_factories(&self) -> Vec<Arc<dyn BlamerFactory>> {
        self.factories.clone()
    }
}

/// Factory source backed by a closure, for hosts that discover factories lazily
pub struct FnFactorySource<F>(pub F);

impl<F> FactorySource for FnFactorySource<F>
where
    F: Fn() -> Vec<Arc<dyn BlamerFactory>> + Send + Sync,
{
    fn list_factories(&self) -> Vec<Arc<dyn BlamerFactory>> {
        (self.0)()
    }
}

impl<F> fmt::Debug for FnFactorySource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnFactorySource").field(&"<list_fn>").finish()
    }
}
