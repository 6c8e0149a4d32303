#![warn(missing_docs)]
//! # cachet-core
//!
//! Protocol-level building blocks for judging HTTP responses against the
//! caching rules of RFC 2616 / RFC 7234.
//!
//! This crate knows nothing about response variants or body translation;
//! those live in `cachet-http`. What it provides is the arithmetic and the
//! header parsing every higher layer is built from:
//!
//! - **Read** headers case-insensitively ([`Headers`])
//! - **Parse** HTTP dates without ever failing loudly ([`date`])
//! - **Extract** `Cache-Control` directives ([`CacheControl`])
//! - **Evaluate** age, freshness lifetime and cacheability ([`Freshness`])
//! - **Inspect** connection persistence ([`connection_closed`])
//! - **Call** whatever transport issues follow-up requests ([`Upstream`])
//!
//! ## Absence instead of errors
//!
//! Malformed headers are routine network input. Every parser here returns
//! `Option` and a missing or unreadable value simply takes the conservative
//! path: no freshness signal, not cacheable, expired.
//!
//! ```
//! use cachet_core::{Freshness, Headers};
//! use chrono::Utc;
//! use http::{HeaderMap, StatusCode};
//!
//! let mut map = HeaderMap::new();
//! map.insert("cache-control", "max-age=600".parse().unwrap());
//!
//! let headers = Headers::new(&map);
//! let freshness = Freshness::new(headers, StatusCode::OK, Utc::now());
//! assert!(freshness.cacheable());
//! ```

pub mod cache_control;
pub mod connection;
pub mod date;
pub mod freshness;
pub mod headers;
pub mod raw;
pub mod upstream;

pub use cache_control::{CacheControl, pragma_no_cache};
pub use connection::connection_closed;
pub use date::{format_http_date, parse_http_date};
pub use freshness::{Freshness, FreshnessPolicy, Reason, Verdict};
pub use headers::Headers;
pub use raw::RawResponse;
pub use upstream::Upstream;
