use cachet_core::{RawResponse, Upstream};
use http::uri::InvalidUri;
use http::{Request, Uri};
use thiserror::Error;
use tracing::debug;

use crate::response::Response;

/// Error returned when following a redirection fails.
///
/// `E` is the error type of the [`Upstream`] used to issue the request.
#[derive(Debug, Error)]
pub enum FollowError<E> {
    /// The redirection carries no readable `Location` header.
    #[error("redirection has no Location header")]
    MissingLocation,

    /// The `Location` header is not a valid URI.
    #[error("invalid Location header {location:?}")]
    InvalidLocation {
        location: String,
        #[source]
        source: InvalidUri,
    },

    /// The follow-up request could not be built.
    #[error(transparent)]
    Request(#[from] http::Error),

    /// The upstream failed to produce a response.
    #[error("upstream request failed")]
    Upstream(#[source] E),

    /// The redirect chain is longer than the allowed number of hops.
    #[error("gave up after {0} redirects")]
    TooManyRedirects(usize),
}

impl<R> Response<R>
where
    R: RawResponse,
{
    /// Follows this response one hop.
    ///
    /// A `Standard` response returns itself without touching `upstream`.
    /// A `Redirection` issues `GET <Location>` through `upstream` and
    /// classifies the result, which may itself be another redirection.
    ///
    /// A relative `Location` is passed to the upstream as is; resolving it
    /// against the original request is the transport's business.
    pub async fn follow<U, E>(self, upstream: &mut U) -> Result<Self, FollowError<E>>
    where
        U: Upstream<Request<()>, Response = Result<R, E>>,
    {
        if !self.is_redirection() {
            return Ok(self);
        }
        let request = redirect_request(self.raw())?;

        debug!(
            status = self.status().as_u16(),
            location = %request.uri(),
            "following redirection"
        );
        let raw = upstream.call(request).await.map_err(FollowError::Upstream)?;
        Ok(Response::classify(raw))
    }

    /// Follows redirections until a `Standard` response arrives.
    ///
    /// At most `limit` hops are made; a chain that is still redirecting after
    /// that fails with [`FollowError::TooManyRedirects`].
    pub async fn follow_redirects<U, E>(
        self,
        upstream: &mut U,
        limit: usize,
    ) -> Result<Self, FollowError<E>>
    where
        U: Upstream<Request<()>, Response = Result<R, E>>,
    {
        let mut response = self;
        let mut hops = 0;
        while response.is_redirection() {
            if hops == limit {
                return Err(FollowError::TooManyRedirects(limit));
            }
            response = response.follow(upstream).await?;
            hops += 1;
        }
        Ok(response)
    }
}

fn redirect_request<R, E>(raw: &R) -> Result<Request<()>, FollowError<E>>
where
    R: RawResponse,
{
    let location = raw
        .headers()
        .get(http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(FollowError::MissingLocation)?;

    let uri = location
        .trim()
        .parse::<Uri>()
        .map_err(|source| FollowError::InvalidLocation {
            location: location.to_owned(),
            source,
        })?;

    Ok(Request::get(uri).body(())?)
}
