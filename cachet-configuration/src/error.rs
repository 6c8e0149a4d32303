//! Error types for configuration loading.

use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid YAML or does not match the schema,
    /// including translator names other than `Json`, `Text` and `Form`.
    #[error(transparent)]
    Yaml(#[from] serde_saphyr::Error),

    /// A status code outside 100-999.
    #[error("invalid status code {0}")]
    InvalidStatus(u16),
}
