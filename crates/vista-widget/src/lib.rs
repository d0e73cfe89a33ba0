//! Widget resolution for Vista.
//!
//! Turns validated directives into named widget descriptors and resolves
//! those names against a runtime-extensible component registry.

pub mod descriptor;
pub mod error;
pub mod registry;
pub mod resolver;

pub use descriptor::{Props, WidgetDescriptor, CHART_WIDGET, TABLE_WIDGET};
pub use error::WidgetError;
pub use registry::{ChartWidget, TableWidget, WidgetComponent, WidgetRegistry};
pub use resolver::{MountedWidget, WidgetResolver};
