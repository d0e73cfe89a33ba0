//! Widget component registry.
//!
//! Maps component names to components. Seeded with the chart and table
//! widgets and open to registration at runtime; the last registration for a
//! name wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::descriptor::{CHART_WIDGET, TABLE_WIDGET};

/// A renderable widget component known to the registry.
pub trait WidgetComponent: fmt::Debug + Send + Sync {
    /// Component name as used in descriptors.
    fn name(&self) -> &str;
}

/// Built-in chart component.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartWidget;

impl WidgetComponent for ChartWidget {
    fn name(&self) -> &str {
        CHART_WIDGET
    }
}

/// Built-in table component.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableWidget;

impl WidgetComponent for TableWidget {
    fn name(&self) -> &str {
        TABLE_WIDGET
    }
}

/// Name to component bindings, shareable across resolvers.
pub struct WidgetRegistry {
    components: RwLock<HashMap<String, Arc<dyn WidgetComponent>>>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    /// Create a registry seeded with the built-in components.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register_defaults();
        registry
    }

    /// Create a registry with no bindings.
    pub fn empty() -> Self {
        Self {
            components: RwLock::new(HashMap::new()),
        }
    }

    /// Register the built-in chart and table components.
    pub fn register_defaults(&self) {
        self.register(CHART_WIDGET, Arc::new(ChartWidget));
        self.register(TABLE_WIDGET, Arc::new(TableWidget));
    }

    /// Bind `name` to `component`, returning the previous binding if any.
    pub fn register(
        &self,
        name: impl Into<String>,
        component: Arc<dyn WidgetComponent>,
    ) -> Option<Arc<dyn WidgetComponent>> {
        let name = name.into();
        let mut components = self.components.write().unwrap_or_else(|e| e.into_inner());
        let previous = components.insert(name.clone(), component);
        if previous.is_some() {
            tracing::debug!(widget = %name, "Widget component re-registered");
        }
        previous
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn WidgetComponent>> {
        self.components
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.components
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(name)
    }

    /// All registered names, sorted.
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .components
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("components", &self.registered_names())
            .finish()
    }
}
