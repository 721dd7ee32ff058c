use thiserror::Error;

/// Configuration-time errors. Raised synchronously from the constructor or
/// the per-route accessors, never during request handling.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Failed to load API description: {0}")]
    DescriptionLoadError(String),

    #[error("Invalid API description: {0}")]
    InvalidDescription(String),

    #[error("Path template not found in description: {0}")]
    PathNotFound(String),

    #[error("No {method} operation declared for path template: {path}")]
    OperationNotFound { method: String, path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuardError>;
