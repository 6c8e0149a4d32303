//! HTTP-date parsing and formatting.
//!
//! Accepts the three formats RFC 7231 §7.1.1.1 obliges recipients to read,
//! plus a lenient RFC 2822 fallback for servers that send numeric offsets:
//!
//! | format        | example                           |
//! |---------------|-----------------------------------|
//! | IMF-fixdate   | `Sun, 06 Nov 1994 08:49:37 GMT`   |
//! | RFC 850       | `Sunday, 06-Nov-94 08:49:37 GMT`  |
//! | ANSI C        | `Sun Nov  6 08:49:37 1994`        |
//! | RFC 2822      | `Sun, 06 Nov 1994 08:49:37 +0000` |

use chrono::{DateTime, NaiveDateTime, Utc};

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Parses an HTTP-date.
///
/// Returns `None` for anything that is not a recognised date. Malformed
/// dates are ordinary network input, so this never errors or panics.
///
/// ```
/// use cachet_core::parse_http_date;
///
/// let date = parse_http_date("Fri, 14 Jan 2011 18:04:05 GMT").unwrap();
/// assert_eq!(date.timestamp(), 1295028245);
///
/// assert!(parse_http_date("THIS IS AN INVALID DATE").is_none());
/// ```
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    [IMF_FIXDATE, RFC_850, ASCTIME]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|date| date.with_timezone(&Utc))
        })
}

/// Renders `date` as an IMF-fixdate, the preferred HTTP-date format.
///
/// Sub-second precision is dropped.
pub fn format_http_date(date: DateTime<Utc>) -> String {
    date.format(IMF_FIXDATE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn nov_6_1994() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap()
    }

    #[test]
    fn test_imf_fixdate() {
        assert_eq!(
            parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"),
            Some(nov_6_1994())
        );
    }

    #[test]
    fn test_rfc_850() {
        assert_eq!(
            parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"),
            Some(nov_6_1994())
        );
    }

    #[test]
    fn test_rfc_2822_offset() {
        assert_eq!(
            parse_http_date("Sun, 06 Nov 1994 09:49:37 +0100"),
            Some(nov_6_1994())
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            parse_http_date("  Sun, 06 Nov 1994 08:49:37 GMT "),
            Some(nov_6_1994())
        );
    }

    #[test]
    fn test_asctime() {
        assert_eq!(parse_http_date("Sun Nov  6 08:49:37 1994"), Some(nov_6_1994()));
        assert_eq!(
            parse_http_date("Wed Nov 16 08:49:37 1994"),
            Some(Utc.with_ymd_and_hms(1994, 11, 16, 8, 49, 37).unwrap())
        );
    }

    #[test]
    fn test_garbage() {
        assert_eq!(parse_http_date(""), None);
        assert_eq!(parse_http_date("invalid date"), None);
        assert_eq!(parse_http_date("0"), None);
        assert_eq!(parse_http_date("Sun, 32 Nov 1994 08:49:37 GMT"), None);
    }

    #[test]
    fn test_format_then_parse() {
        let date = nov_6_1994();
        assert_eq!(format_http_date(date), "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(parse_http_date(&format_http_date(date)), Some(date));
    }
}
