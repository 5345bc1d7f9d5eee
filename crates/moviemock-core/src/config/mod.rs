//! Settings and fixture file loading.

pub mod error;
pub mod parser;
pub mod settings;

pub use error::ConfigError;
pub use settings::{MockSettings, ProfileTemplate, RoutePaths};
