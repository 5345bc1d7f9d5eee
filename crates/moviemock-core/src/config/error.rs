//! Error types for settings and fixture loading.

use std::path::PathBuf;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Unknown file type
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
    /// Invalid glob pattern for fixture files
    #[error("Invalid fixtures pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// A path matched by the fixtures pattern could not be accessed
    #[error("Failed to expand fixtures pattern: {0}")]
    Glob(#[from] glob::GlobError),
    /// Fixtures pattern matched nothing
    #[error("No fixture files match pattern: {0}")]
    NoFixtures(String),
}
