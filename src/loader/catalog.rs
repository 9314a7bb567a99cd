use crate::controller::ControllerType;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Controller types defined by the modules loaded so far.
///
/// Shared by every in-flight dispatch; cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct ControllerCatalog {
    types: Arc<DashMap<String, Arc<ControllerType>>>,
}

impl ControllerCatalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a type. A second definition under the same name is ignored, so
    /// loading a module twice can never redefine what it declared.
    ///
    /// Returns `true` when the type was newly defined.
    pub fn register(&self, ty: ControllerType) -> bool {
        let name = ty.name().to_string();
        match self.types.entry(name) {
            Entry::Occupied(existing) => {
                debug!(type_name = %existing.key(), "Controller type already defined; keeping first definition");
                false
            }
            Entry::Vacant(slot) => {
                debug!(type_name = %slot.key(), methods = ty.methods().count(), "Controller type defined");
                slot.insert(Arc::new(ty));
                true
            }
        }
    }

    /// Type registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ControllerType>> {
        self.types.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// `true` when `name` is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of defined types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// `true` when nothing is defined yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
