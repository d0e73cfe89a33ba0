//! Directive to widget resolution.

use std::sync::Arc;

use vista_action::Directive;

use crate::descriptor::{Props, WidgetDescriptor};
use crate::error::WidgetError;
use crate::registry::{WidgetComponent, WidgetRegistry};

/// A resolved component together with the props it was mounted with.
#[derive(Debug, Clone)]
pub struct MountedWidget {
    pub component: Arc<dyn WidgetComponent>,
    pub descriptor: WidgetDescriptor,
}

impl MountedWidget {
    pub fn props(&self) -> &Props {
        &self.descriptor.props
    }
}

/// Resolves directives to components through a shared registry.
#[derive(Debug, Clone)]
pub struct WidgetResolver {
    registry: Arc<WidgetRegistry>,
}

impl Default for WidgetResolver {
    fn default() -> Self {
        Self::new(Arc::new(WidgetRegistry::new()))
    }
}

impl WidgetResolver {
    pub fn new(registry: Arc<WidgetRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this resolver looks names up in.
    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        &self.registry
    }

    pub fn to_widget_descriptor(&self, directive: &Directive) -> Option<WidgetDescriptor> {
        WidgetDescriptor::from_directive(directive)
    }

    /// Look up a component by name. A miss is not an error at this level.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn WidgetComponent>> {
        self.registry.get(name)
    }

    /// Build the descriptor for `directive` and resolve its component.
    pub fn mount(&self, directive: &Directive) -> Result<MountedWidget, WidgetError> {
        let descriptor = self
            .to_widget_descriptor(directive)
            .ok_or_else(|| WidgetError::UnsupportedDirective(directive.kind().to_string()))?;

        let component = self.resolve(&descriptor.component_name).ok_or_else(|| {
            tracing::warn!(widget = %descriptor.component_name, "Widget component not registered");
            WidgetError::ComponentNotFound(descriptor.component_name.clone())
        })?;

        tracing::debug!(widget = %descriptor.component_name, "Widget mounted");
        Ok(MountedWidget {
            component,
            descriptor,
        })
    }
}
