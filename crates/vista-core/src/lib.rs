pub mod config;
pub mod error;
pub mod types;

pub use config::{ChatConfig, GeneralConfig, VistaConfig};
pub use error::{Result, VistaError};
pub use types::Timestamp;
