use cachet_core::RawResponse;
use serde_json::Value;

use super::{Options, Translator, TranslatorError};

/// Parses the body as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTranslator;

impl Translator for JsonTranslator {
    fn deserialise(
        &self,
        response: &dyn RawResponse,
        _options: &Options,
    ) -> Result<Value, TranslatorError> {
        Ok(serde_json::from_slice(response.body())?)
    }
}
