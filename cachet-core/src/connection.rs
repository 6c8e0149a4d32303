//! Connection persistence.

use crate::headers::Headers;

/// Whether the server announced it will close the connection.
///
/// Only a `Connection` value of exactly `Close` counts. The comparison is
/// case-sensitive, and any other value (including an empty one or a missing
/// header) leaves the connection persistent, HTTP/1.1's default.
///
/// ```
/// use cachet_core::{Headers, connection_closed};
/// use http::HeaderMap;
///
/// let mut map = HeaderMap::new();
/// map.insert("connection", "Close".parse().unwrap());
/// assert!(connection_closed(&Headers::new(&map)));
///
/// map.insert("connection", "".parse().unwrap());
/// assert!(!connection_closed(&Headers::new(&map)));
/// ```
pub fn connection_closed(headers: &Headers<'_>) -> bool {
    headers.get("connection") == Some("Close")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue};

    fn closed(value: Option<&'static str>) -> bool {
        let mut map = HeaderMap::new();
        if let Some(value) = value {
            map.insert("connection", HeaderValue::from_static(value));
        }
        connection_closed(&Headers::new(&map))
    }

    #[test]
    fn test_connection_closed() {
        assert!(closed(Some("Close")));
        assert!(!closed(Some("close")));
        assert!(!closed(Some("keep-alive")));
        assert!(!closed(Some("")));
        assert!(!closed(None));
    }
}
