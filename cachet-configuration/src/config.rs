use cachet_core::FreshnessPolicy;
use cachet_http::translator::{FormTranslator, JsonTranslator, TextTranslator, TranslatorRegistry};
use http::StatusCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Built-in translators selectable by name.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum TranslatorKind {
    /// [`JsonTranslator`]
    Json,
    /// [`TextTranslator`]
    Text,
    /// [`FormTranslator`]
    Form,
}

impl TranslatorKind {
    fn register(self, registry: &mut TranslatorRegistry, content_type: &str) {
        match self {
            TranslatorKind::Json => registry.register(content_type, JsonTranslator),
            TranslatorKind::Text => registry.register(content_type, TextTranslator),
            TranslatorKind::Form => registry.register(content_type, FormTranslator),
        };
    }
}

fn default_statuses() -> Vec<u16> {
    vec![200, 203, 300, 301]
}

fn default_max_redirects() -> usize {
    5
}

fn default_translators() -> IndexMap<String, TranslatorKind> {
    [
        ("application/json", TranslatorKind::Json),
        ("text/javascript", TranslatorKind::Json),
        ("text/plain", TranslatorKind::Text),
        ("application/x-www-form-urlencoded", TranslatorKind::Form),
    ]
    .into_iter()
    .map(|(content_type, kind)| (content_type.to_owned(), kind))
    .collect()
}

/// Evaluator configuration.
///
/// Every field is optional in YAML; missing fields take the built-in defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Status codes eligible for caching.
    #[serde(default = "default_statuses")]
    pub cacheable_statuses: Vec<u16>,
    /// Hop limit for `follow_redirects`.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Media type to translator. Replaces the built-in set when present.
    #[serde(default = "default_translators")]
    pub translators: IndexMap<String, TranslatorKind>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cacheable_statuses: default_statuses(),
            max_redirects: default_max_redirects(),
            translators: default_translators(),
        }
    }
}

impl Config {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_saphyr::from_str(yaml)?;
        config.validate()?;
        debug!(
            statuses = ?config.cacheable_statuses,
            max_redirects = config.max_redirects,
            translators = config.translators.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Checks every status code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.statuses().map(drop)
    }

    /// The cacheable status set as a policy.
    pub fn freshness_policy(&self) -> Result<FreshnessPolicy, ConfigError> {
        Ok(FreshnessPolicy::new(self.statuses()?))
    }

    /// A registry holding exactly the configured translators.
    pub fn registry(&self) -> TranslatorRegistry {
        let mut registry = TranslatorRegistry::new();
        for (content_type, kind) in &self.translators {
            kind.register(&mut registry, content_type);
        }
        registry
    }

    fn statuses(&self) -> Result<Vec<StatusCode>, ConfigError> {
        self.cacheable_statuses
            .iter()
            .map(|&code| StatusCode::from_u16(code).map_err(|_| ConfigError::InvalidStatus(code)))
            .collect()
    }
}
