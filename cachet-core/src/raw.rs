//! The raw response handed over by a transport.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// Read access to a response as produced by a transport.
///
/// This is the only thing the evaluator needs from the network layer. It is
/// object safe so translators can receive `&dyn RawResponse` regardless of
/// the concrete transport type.
///
/// # For Implementors
///
/// `headers` must be the full multimap; lookups through
/// [`Headers`](crate::Headers) are case-insensitive and first-match.
/// The default [`content_type`](Self::content_type) reads the
/// `Content-Type` header; override it if the transport tracks the media type
/// separately.
pub trait RawResponse {
    /// The response status code.
    fn status(&self) -> StatusCode;

    /// All response headers.
    fn headers(&self) -> &HeaderMap;

    /// The complete response body.
    fn body(&self) -> &[u8];

    /// The raw `Content-Type` value, parameters included.
    fn content_type(&self) -> Option<&str> {
        self.headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

impl RawResponse for http::Response<Bytes> {
    fn status(&self) -> StatusCode {
        http::Response::<Bytes>::status(self)
    }

    fn headers(&self) -> &HeaderMap {
        http::Response::<Bytes>::headers(self)
    }

    fn body(&self) -> &[u8] {
        http::Response::<Bytes>::body(self)
    }
}

impl<R> RawResponse for &R
where
    R: RawResponse + ?Sized,
{
    fn status(&self) -> StatusCode {
        (**self).status()
    }

    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    fn body(&self) -> &[u8] {
        (**self).body()
    }

    fn content_type(&self) -> Option<&str> {
        (**self).content_type()
    }
}
