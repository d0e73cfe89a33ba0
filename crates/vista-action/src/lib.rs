//! Visualization directives for Vista.
//!
//! Defines the chart/table directive union produced by the response engine,
//! together with its structural validator and the lossy converter between
//! the two directive shapes.

pub mod error;
pub mod transformer;
pub mod types;
pub mod validator;

pub use error::{ActionError, BoxError};
pub use transformer::ActionTransformer;
pub use types::{number_value, ChartDirective, Directive, Row, TableDirective};
pub use validator::ActionValidator;
