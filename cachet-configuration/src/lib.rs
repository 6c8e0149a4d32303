//! YAML configuration for the cachet response evaluator.
//!
//! ```
//! use cachet_configuration::Config;
//!
//! let config = Config::from_yaml(r#"
//! cacheable_statuses: [200, 203]
//! max_redirects: 3
//! translators:
//!   application/json: Json
//!   application/hal+json: Json
//! "#).unwrap();
//!
//! assert_eq!(config.max_redirects, 3);
//! let registry = config.registry();
//! assert!(registry.lookup("application/hal+json").is_some());
//! ```

mod config;
pub mod error;

pub use config::{Config, TranslatorKind};
pub use error::ConfigError;
