use cachet_core::RawResponse;
use serde_json::Value;

use super::{Options, Translator, TranslatorError};

/// Returns the body as a JSON string. The body must be UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTranslator;

impl Translator for TextTranslator {
    fn deserialise(
        &self,
        response: &dyn RawResponse,
        _options: &Options,
    ) -> Result<Value, TranslatorError> {
        let text = std::str::from_utf8(response.body())?;
        Ok(Value::String(text.to_owned()))
    }
}
