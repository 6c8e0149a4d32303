//! The seam through which redirections are followed.

use std::future::Future;

/// Trait for issuing follow-up requests through whatever transport produced
/// the original response.
///
/// The evaluator itself performs no I/O. When a redirection has to be
/// followed, the request is handed to an `Upstream` and the response it
/// resolves to is classified like any other.
///
/// # Examples
///
/// ```rust
/// use bytes::Bytes;
/// use cachet_core::Upstream;
/// use std::convert::Infallible;
/// use std::future::Ready;
///
/// struct Empty;
///
/// impl Upstream<http::Request<()>> for Empty {
///     type Response = Result<http::Response<Bytes>, Infallible>;
///     type Future = Ready<Self::Response>;
///
///     fn call(&mut self, _req: http::Request<()>) -> Self::Future {
///         std::future::ready(Ok(http::Response::new(Bytes::new())))
///     }
/// }
/// ```
pub trait Upstream<Req> {
    /// The response type returned by the upstream service
    type Response;

    /// The future that resolves to the response
    type Future: Future<Output = Self::Response> + Send;

    /// Call the upstream service with the given request
    fn call(&mut self, req: Req) -> Self::Future;
}
