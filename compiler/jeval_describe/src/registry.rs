//! Per-session description registry.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::component::ComponentDescription;

/// Component descriptions of one design session, keyed by class name.
///
/// Descriptions are registered while loading and shared read-only with
/// every evaluation pass afterwards.
#[derive(Default)]
pub struct DescriptionRegistry {
    components: RwLock<FxHashMap<String, Arc<ComponentDescription>>>,
}

impl DescriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a description, replacing any earlier one for the class.
    pub fn register(&self, description: ComponentDescription) -> Arc<ComponentDescription> {
        let description = Arc::new(description);
        tracing::trace!(class = description.class_name(), "registering description");
        self.components
            .write()
            .insert(description.class_name().to_string(), description.clone());
        description
    }

    pub fn get(&self, class_name: &str) -> Option<Arc<ComponentDescription>> {
        self.components.read().get(class_name).cloned()
    }

    /// First description along a class hierarchy, most specific class first.
    pub fn find_in_hierarchy<'a>(
        &self,
        class_names: impl IntoIterator<Item = &'a str>,
    ) -> Option<Arc<ComponentDescription>> {
        let components = self.components.read();
        class_names
            .into_iter()
            .find_map(|name| components.get(name).cloned())
    }

    pub fn len(&self) -> usize {
        self.components.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.read().is_empty()
    }
}

impl std::fmt::Debug for DescriptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionRegistry")
            .field("components", &self.components.read().len())
            .finish()
    }
}
