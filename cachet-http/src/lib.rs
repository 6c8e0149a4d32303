//! HTTP response classification on top of `cachet-core`.
//!
//! A raw response from the transport is classified once into a
//! [`Response`]: either a `Standard` response or a `Redirection`. Both
//! variants answer the same questions (is it cacheable, how old is it, can it
//! be revalidated, what does its body deserialise to) and differ only in
//! what [`Response::follow`] does.
//!
//! ```
//! use bytes::Bytes;
//! use cachet_http::Response;
//!
//! let raw = http::Response::builder()
//!     .status(304)
//!     .header("etag", "\"abc\"")
//!     .body(Bytes::new())
//!     .unwrap();
//!
//! let response = Response::classify(raw);
//! assert!(!response.is_redirection());
//! assert!(response.can_be_validated());
//! ```

mod redirect;
mod response;
pub mod translator;

pub use redirect::FollowError;
pub use response::Response;
pub use translator::{
    DeserialiseError, FormTranslator, JsonTranslator, Options, TextTranslator, Translator,
    TranslatorError, TranslatorRegistry,
};

pub use cachet_core::{
    CacheControl, Freshness, FreshnessPolicy, Headers, RawResponse, Reason, Upstream, Verdict,
};
