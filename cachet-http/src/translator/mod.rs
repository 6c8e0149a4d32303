//! Body translation, selected by content type.
//!
//! A [`Translator`] turns a response body into a [`serde_json::Value`]. The
//! [`TranslatorRegistry`] maps media types to translators and is always
//! passed in explicitly; there is no global registry.
//!
//! ```
//! use bytes::Bytes;
//! use cachet_http::{Options, Response, TranslatorRegistry};
//! use serde_json::json;
//!
//! let raw = http::Response::builder()
//!     .header("content-type", "application/json; charset=utf-8")
//!     .body(Bytes::from_static(br#"{"menu": "File"}"#))
//!     .unwrap();
//!
//! let registry = TranslatorRegistry::with_defaults();
//! let value = Response::classify(raw)
//!     .deserialise(&registry, &Options::new())
//!     .unwrap();
//! assert_eq!(value, json!({"menu": "File"}));
//! ```

mod form;
mod json;
mod registry;
mod text;

use cachet_core::RawResponse;
use serde_json::Value;
use thiserror::Error;

pub use form::FormTranslator;
pub use json::JsonTranslator;
pub use registry::TranslatorRegistry;
pub use text::TextTranslator;

/// Free-form options forwarded untouched to a translator.
pub type Options = serde_json::Map<String, Value>;

/// Converts a response body into a structured value.
///
/// # For Implementors
///
/// Translators receive the whole response, not just the body, so they can
/// inspect headers such as the `charset` parameter. `options` come straight
/// from the caller of
/// [`Response::deserialise`](crate::Response::deserialise); ignore the ones
/// you do not understand.
pub trait Translator: Send + Sync {
    /// Deserialises `response`'s body.
    fn deserialise(
        &self,
        response: &dyn RawResponse,
        options: &Options,
    ) -> Result<Value, TranslatorError>;
}

/// Failure inside a translator.
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// The body is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The body is not valid UTF-8.
    #[error("body is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    /// The body is not a flat urlencoded form.
    #[error(transparent)]
    Form(#[from] serde_qs::Error),
}

/// Error returned by [`Response::deserialise`](crate::Response::deserialise)
/// and [`Response::deserialise_using`](crate::Response::deserialise_using).
#[derive(Debug, Error)]
pub enum DeserialiseError {
    /// The response carries no `Content-Type`.
    #[error("response has no content type")]
    MissingContentType,

    /// Nothing is registered for the response's content type.
    #[error("no translator registered for content type {0:?}")]
    UnsupportedContentType(String),

    /// The translator itself failed.
    #[error(transparent)]
    Translator(#[from] TranslatorError),
}

/// `application/json; charset=utf-8` → `application/json`.
pub(crate) fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type() {
        assert_eq!(media_type("application/json"), "application/json");
        assert_eq!(
            media_type("Application/XML; charset=utf-8"),
            "application/xml"
        );
        assert_eq!(media_type("  text/plain ;format=flowed"), "text/plain");
        assert_eq!(media_type(""), "");
    }
}
