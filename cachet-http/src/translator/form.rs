use std::collections::BTreeMap;

use cachet_core::RawResponse;
use serde::Deserialize;
use serde_json::Value;

use super::{Options, Translator, TranslatorError};

const MAX_DEPTH: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Field {
    Scalar(String),
    Array(Vec<String>),
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        match field {
            Field::Scalar(value) => Value::String(value),
            Field::Array(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        }
    }
}

/// Parses an `application/x-www-form-urlencoded` body into an object of
/// strings.
///
/// Repeated fields use bracket syntax (`color[]=red&color[]=blue`) and become
/// arrays. Nested objects (`a[b]=c`) are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormTranslator;

impl Translator for FormTranslator {
    fn deserialise(
        &self,
        response: &dyn RawResponse,
        _options: &Options,
    ) -> Result<Value, TranslatorError> {
        let body = std::str::from_utf8(response.body())?;
        let fields: BTreeMap<String, Field> =
            serde_qs::Config::new(MAX_DEPTH, false).deserialize_str(body)?;

        Ok(Value::Object(
            fields
                .into_iter()
                .map(|(name, field)| (name, Value::from(field)))
                .collect(),
        ))
    }
}
