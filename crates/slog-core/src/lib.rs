//! slog core - Severities, configuration, and error handling

pub mod config;
pub mod constants;
pub mod error;
pub mod severity;

pub use config::*;
pub use constants::*;
pub use error::{Error, Result};
pub use severity::Severity;
