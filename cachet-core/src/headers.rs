//! Case-insensitive, read-only access to response headers.

use chrono::{DateTime, Utc};
use http::HeaderMap;

use crate::date::parse_http_date;

/// Borrowed view over a [`HeaderMap`] that hands out header values as strings.
///
/// Lookups are case-insensitive on the header name. When a header occurs
/// more than once, [`get`](Self::get) returns the **first** occurrence; use
/// [`get_all`](Self::get_all) to see every line.
///
/// Values that are not visible ASCII cannot be represented as `&str` and are
/// treated as if the header were absent.
///
/// # Examples
///
/// ```
/// use cachet_core::Headers;
/// use http::HeaderMap;
///
/// let mut map = HeaderMap::new();
/// map.insert("content-type", "application/json".parse().unwrap());
///
/// let headers = Headers::new(&map);
/// assert_eq!(headers.get("Content-Type"), Some("application/json"));
/// assert_eq!(headers.get("content-type"), Some("application/json"));
/// assert_eq!(headers.get("etag"), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Headers<'a> {
    map: &'a HeaderMap,
}

impl<'a> Headers<'a> {
    /// Wraps a header map.
    pub fn new(map: &'a HeaderMap) -> Self {
        Headers { map }
    }

    /// Returns the underlying header map.
    #[inline]
    pub fn map(&self) -> &'a HeaderMap {
        self.map
    }

    /// Returns the first value of `name` as a string.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.map.get(name).and_then(|value| value.to_str().ok())
    }

    /// Returns every readable value of `name`, in arrival order.
    pub fn get_all(&self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.map
            .get_all(name)
            .into_iter()
            .filter_map(|value| value.to_str().ok())
    }

    /// Whether `name` is present at all, whatever its value.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Parses `name` as an HTTP date.
    ///
    /// Absent and unparsable values both yield `None`. The same routine backs
    /// `Date`, `Expires`, `Last-Modified` and any other date-valued header.
    pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(parse_http_date)
    }

    /// Parses `name` as a non-negative integer (delta-seconds).
    pub fn seconds(&self, name: &str) -> Option<u64> {
        self.get(name)
            .and_then(|value| value.trim().parse::<u64>().ok())
    }
}

impl<'a> From<&'a HeaderMap> for Headers<'a> {
    fn from(map: &'a HeaderMap) -> Self {
        Headers::new(map)
    }
}
