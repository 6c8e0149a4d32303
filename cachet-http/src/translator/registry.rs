use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use super::{FormTranslator, JsonTranslator, TextTranslator, Translator, media_type};

/// Media type → translator lookup table.
///
/// Keys are normalised media types: lowercase, without parameters. Lookups
/// normalise the same way, so `Application/JSON; charset=utf-8` finds the
/// translator registered for `application/json`.
///
/// Cloning is cheap; translators are shared behind [`Arc`].
#[derive(Clone, Default)]
pub struct TranslatorRegistry {
    translators: HashMap<String, Arc<dyn Translator>>,
}

impl TranslatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in translators:
    ///
    /// | media type                          | translator         |
    /// |-------------------------------------|--------------------|
    /// | `application/json`                  | [`JsonTranslator`] |
    /// | `text/javascript`                   | [`JsonTranslator`] |
    /// | `text/plain`                        | [`TextTranslator`] |
    /// | `application/x-www-form-urlencoded` | [`FormTranslator`] |
    pub fn with_defaults() -> Self {
        Self::new()
            .with("application/json", JsonTranslator)
            .with("text/javascript", JsonTranslator)
            .with("text/plain", TextTranslator)
            .with("application/x-www-form-urlencoded", FormTranslator)
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T>(mut self, content_type: &str, translator: T) -> Self
    where
        T: Translator + 'static,
    {
        self.register(content_type, translator);
        self
    }

    /// Registers `translator` for `content_type`, replacing any previous one.
    pub fn register<T>(&mut self, content_type: &str, translator: T) -> &mut Self
    where
        T: Translator + 'static,
    {
        self.register_shared(content_type, Arc::new(translator))
    }

    /// Registers an already shared translator.
    pub fn register_shared(
        &mut self,
        content_type: &str,
        translator: Arc<dyn Translator>,
    ) -> &mut Self {
        self.translators.insert(media_type(content_type), translator);
        self
    }

    /// The translator for `content_type`, parameters ignored.
    pub fn lookup(&self, content_type: &str) -> Option<&Arc<dyn Translator>> {
        self.translators.get(&media_type(content_type))
    }

    /// Registered media types, in no particular order.
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.translators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}

impl Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut content_types: Vec<_> = self.content_types().collect();
        content_types.sort_unstable();
        f.debug_struct("TranslatorRegistry")
            .field("content_types", &content_types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = TranslatorRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        assert!(registry.lookup("application/json").is_some());
        assert!(registry.lookup("TEXT/PLAIN; charset=us-ascii").is_some());
        assert!(registry.lookup("application/xml").is_none());
    }

    #[test]
    fn test_register_normalises_key() {
        let mut registry = TranslatorRegistry::new();
        assert!(registry.is_empty());

        registry.register("Application/Problem+JSON; charset=utf-8", JsonTranslator);
        assert!(registry.lookup("application/problem+json").is_some());
        assert_eq!(
            registry.content_types().collect::<Vec<_>>(),
            vec!["application/problem+json"]
        );
    }

    #[test]
    fn test_debug_lists_content_types() {
        let registry = TranslatorRegistry::new()
            .with("text/plain", TextTranslator)
            .with("application/json", JsonTranslator);
        assert_eq!(
            format!("{registry:?}"),
            r#"TranslatorRegistry { content_types: ["application/json", "text/plain"] }"#
        );
    }
}
