use bytes::Bytes;
use cachet_core::{
    Freshness, FreshnessPolicy, Headers, RawResponse, Verdict, connection_closed,
};
use chrono::{DateTime, TimeDelta, Utc};
use http::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::translator::{DeserialiseError, Options, Translator, TranslatorRegistry};

/// A classified HTTP response.
///
/// The variant is chosen once by [`classify`](Self::classify) and never
/// changes. Every capability is available on both variants; only
/// [`follow`](Self::follow) behaves differently:
///
/// - `Standard` follows to itself, so callers may call `follow`
///   unconditionally without checking the variant first;
/// - `Redirection` requests its `Location` through an
///   [`Upstream`](cachet_core::Upstream).
///
/// Freshness accessors evaluate against the wall clock at the time of the
/// call; the `*_at` and [`freshness_at`](Self::freshness_at) forms take an
/// explicit instant instead.
#[derive(Debug, Clone)]
pub enum Response<R = http::Response<Bytes>> {
    /// Any response that is not a redirection, including `304 Not Modified`.
    Standard(R),
    /// A 3xx response other than `304`.
    Redirection(R),
}

impl<R> Response<R>
where
    R: RawResponse,
{
    /// Picks the variant for `raw` from its status code.
    ///
    /// Every 3xx status except `304 Not Modified` is a redirection; `304` is
    /// a cache-validation answer, not something to follow.
    pub fn classify(raw: R) -> Self {
        let status = raw.status();
        let response = if is_redirection(status) {
            Response::Redirection(raw)
        } else {
            Response::Standard(raw)
        };
        debug!(
            status = status.as_u16(),
            redirection = response.is_redirection(),
            "response classified"
        );
        response
    }

    /// The wrapped transport response.
    pub fn raw(&self) -> &R {
        match self {
            Response::Standard(raw) | Response::Redirection(raw) => raw,
        }
    }

    /// Unwraps the transport response.
    pub fn into_raw(self) -> R {
        match self {
            Response::Standard(raw) | Response::Redirection(raw) => raw,
        }
    }

    /// Whether this is the `Redirection` variant.
    #[inline]
    pub fn is_redirection(&self) -> bool {
        matches!(self, Response::Redirection(_))
    }

    pub fn status(&self) -> StatusCode {
        self.raw().status()
    }

    /// Case-insensitive header access.
    pub fn headers(&self) -> Headers<'_> {
        Headers::new(self.raw().headers())
    }

    /// Shorthand for `headers().get(name)`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)
    }

    pub fn body(&self) -> &[u8] {
        self.raw().body()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.raw().content_type()
    }

    /// The `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Freshness evaluation as of now.
    pub fn freshness(&self) -> Freshness<'_> {
        self.freshness_at(Utc::now())
    }

    /// Freshness evaluation as of `now`.
    pub fn freshness_at(&self, now: DateTime<Utc>) -> Freshness<'_> {
        Freshness::new(self.headers(), self.status(), now)
    }

    /// Whether the response may be stored and served from a cache.
    ///
    /// See [`Freshness`] for the exact rules.
    pub fn cacheable(&self) -> bool {
        self.log_verdict(self.freshness().explain())
    }

    /// [`cacheable`](Self::cacheable) under a non-default status policy.
    pub fn cacheable_with(&self, policy: &FreshnessPolicy) -> bool {
        self.log_verdict(self.freshness().with_policy(policy).explain())
    }

    /// The `Expires` header as a date.
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.freshness().expires()
    }

    /// The `Date` header as a date.
    pub fn response_date(&self) -> Option<DateTime<Utc>> {
        self.freshness().response_date()
    }

    pub fn current_age(&self) -> TimeDelta {
        self.freshness().current_age()
    }

    pub fn freshness_lifetime(&self) -> Option<TimeDelta> {
        self.freshness().freshness_lifetime()
    }

    pub fn expired(&self) -> bool {
        self.freshness().expired()
    }

    pub fn expires_not_in_its_past(&self) -> bool {
        self.freshness().expires_not_in_its_past()
    }

    pub fn expires_not_in_our_past(&self) -> bool {
        self.freshness().expires_not_in_our_past()
    }

    /// Whether `ETag` or `Last-Modified` allows revalidation.
    pub fn can_be_validated(&self) -> bool {
        self.freshness().can_be_validated()
    }

    /// Whether the server is closing the connection (`Connection: Close`).
    pub fn connection_closed(&self) -> bool {
        connection_closed(&self.headers())
    }

    /// Deserialises the body with the translator registered for its content
    /// type.
    ///
    /// Parameters such as `charset` are ignored for the lookup. A missing
    /// content type or one without a registered translator is an error;
    /// there is no fallback translator.
    pub fn deserialise(
        &self,
        registry: &TranslatorRegistry,
        options: &Options,
    ) -> Result<Value, DeserialiseError> {
        let content_type = self
            .content_type()
            .ok_or(DeserialiseError::MissingContentType)?;
        let translator = registry.lookup(content_type).ok_or_else(|| {
            warn!(content_type, "no translator registered");
            DeserialiseError::UnsupportedContentType(content_type.to_owned())
        })?;
        self.deserialise_using(translator.as_ref(), options)
    }

    /// Deserialises the body with `translator`, ignoring the content type.
    pub fn deserialise_using<T>(
        &self,
        translator: &T,
        options: &Options,
    ) -> Result<Value, DeserialiseError>
    where
        T: Translator + ?Sized,
    {
        Ok(translator.deserialise(self.raw(), options)?)
    }

    fn log_verdict(&self, verdict: Verdict) -> bool {
        match verdict {
            Verdict::Cacheable => debug!(status = self.status().as_u16(), "response cacheable"),
            Verdict::NotCacheable(reason) => debug!(
                status = self.status().as_u16(),
                reason = reason.as_str(),
                "response not cacheable"
            ),
        }
        verdict.is_cacheable()
    }
}

fn is_redirection(status: StatusCode) -> bool {
    status.is_redirection() && status != StatusCode::NOT_MODIFIED
}
