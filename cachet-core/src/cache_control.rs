//! `Cache-Control` directive extraction.

use crate::headers::Headers;

/// The `Cache-Control` directives that influence cacheability and freshness.
///
/// Only three directives are interpreted; everything else (`public`,
/// `private`, `must-revalidate`, extensions) is skipped.
///
/// # Examples
///
/// ```
/// use cachet_core::CacheControl;
///
/// let directives = CacheControl::parse("public, max-age=600, no-store");
/// assert_eq!(directives.max_age, Some(600));
/// assert!(directives.no_store);
/// assert!(!directives.no_cache);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheControl {
    /// `max-age=<delta-seconds>`. `None` when absent or malformed.
    pub max_age: Option<u64>,
    /// `no-cache`, with or without a field-name argument.
    pub no_cache: bool,
    /// `no-store`.
    pub no_store: bool,
}

impl CacheControl {
    /// Parses a single `Cache-Control` header value.
    ///
    /// Directive names are case-insensitive. A malformed `max-age` (negative,
    /// fractional, empty) is treated as absent, and the first well-formed
    /// `max-age` wins when several are present.
    pub fn parse(value: &str) -> Self {
        let mut directives = CacheControl::default();
        directives.merge(value);
        directives
    }

    /// Collects the directives from every `cache-control` line in `headers`.
    pub fn from_headers(headers: &Headers<'_>) -> Self {
        let mut directives = CacheControl::default();
        for value in headers.get_all("cache-control") {
            directives.merge(value);
        }
        directives
    }

    /// Whether any directive forbids serving the response from a cache.
    #[inline]
    pub fn forbids_caching(&self) -> bool {
        self.no_cache || self.no_store
    }

    fn merge(&mut self, value: &str) {
        for directive in value.split(',') {
            let directive = directive.trim();
            let (name, argument) = match directive.split_once('=') {
                Some((name, argument)) => (name.trim(), Some(argument.trim())),
                None => (directive, None),
            };

            if name.eq_ignore_ascii_case("max-age") {
                if self.max_age.is_none() {
                    self.max_age = argument.and_then(parse_delta_seconds);
                }
            } else if name.eq_ignore_ascii_case("no-cache") {
                self.no_cache = true;
            } else if name.eq_ignore_ascii_case("no-store") {
                self.no_store = true;
            }
        }
    }
}

/// `Pragma: no-cache`, the HTTP/1.0 spelling of `Cache-Control: no-cache`.
pub fn pragma_no_cache(headers: &Headers<'_>) -> bool {
    headers.get_all("pragma").any(|value| {
        value
            .split(',')
            .any(|directive| directive.trim().eq_ignore_ascii_case("no-cache"))
    })
}

fn parse_delta_seconds(argument: &str) -> Option<u64> {
    let argument = argument
        .strip_prefix('"')
        .and_then(|quoted| quoted.strip_suffix('"'))
        .unwrap_or(argument);

    if argument.is_empty() || !argument.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    // delta-seconds too large to represent saturate, as RFC 7234 §1.2.1 asks
    Some(argument.parse::<u64>().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue};

    #[test]
    fn test_parse_all_recognised_directives() {
        let directives = CacheControl::parse("max-age=4000, no-cache");
        assert_eq!(
            directives,
            CacheControl {
                max_age: Some(4000),
                no_cache: true,
                no_store: false,
            }
        );
    }

    #[test]
    fn test_directive_names_ignore_case() {
        let directives = CacheControl::parse("Max-Age=60, NO-STORE");
        assert_eq!(directives.max_age, Some(60));
        assert!(directives.no_store);
    }

    #[test]
    fn test_malformed_max_age_is_absent() {
        for value in ["max-age=", "max-age=-1", "max-age=1.5", "max-age=abc", "max-age"] {
            assert_eq!(CacheControl::parse(value).max_age, None, "{value}");
        }
    }

    #[test]
    fn test_quoted_max_age() {
        assert_eq!(CacheControl::parse("max-age=\"30\"").max_age, Some(30));
    }

    #[test]
    fn test_oversized_max_age_saturates() {
        assert_eq!(
            CacheControl::parse("max-age=99999999999999999999999").max_age,
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_first_max_age_wins() {
        assert_eq!(
            CacheControl::parse("max-age=10, max-age=20").max_age,
            Some(10)
        );
        assert_eq!(CacheControl::parse("max-age=x, max-age=20").max_age, Some(20));
    }

    #[test]
    fn test_no_cache_with_field_names() {
        assert!(CacheControl::parse("no-cache=\"set-cookie\"").no_cache);
    }

    #[test]
    fn test_unknown_directives_ignored() {
        assert_eq!(
            CacheControl::parse("public, must-revalidate, s-maxage=10"),
            CacheControl::default()
        );
    }

    #[test]
    fn test_multiple_header_lines() {
        let mut map = HeaderMap::new();
        map.append("cache-control", HeaderValue::from_static("public"));
        map.append("cache-control", HeaderValue::from_static("max-age=90"));
        map.append("cache-control", HeaderValue::from_static("no-store"));

        let directives = CacheControl::from_headers(&Headers::new(&map));
        assert_eq!(directives.max_age, Some(90));
        assert!(directives.no_store);
    }

    #[test]
    fn test_pragma() {
        let mut map = HeaderMap::new();
        assert!(!pragma_no_cache(&Headers::new(&map)));

        map.insert("pragma", HeaderValue::from_static("No-Cache"));
        assert!(pragma_no_cache(&Headers::new(&map)));

        map.insert("pragma", HeaderValue::from_static("x-custom"));
        assert!(!pragma_no_cache(&Headers::new(&map)));
    }
}
