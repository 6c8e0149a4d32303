//! Age, freshness lifetime and cacheability of a single response.
//!
//! [`Freshness`] evaluates one response at one instant. It reads headers
//! through [`Headers`] and never fails: a header that is missing or cannot be
//! parsed simply removes the signal it would have contributed.
//!
//! ## Clocks
//!
//! Two notions of time are in play and they are never reconciled:
//!
//! - the response's own `Date` header, the origin's claim of when it issued
//!   the response;
//! - `now`, the evaluator's wall clock.
//!
//! Clock skew between the two is not corrected. This is why
//! [`expires_not_in_its_past`](Freshness::expires_not_in_its_past) (judged
//! against `Date`) and
//! [`expires_not_in_our_past`](Freshness::expires_not_in_our_past) (judged
//! against `now`) are separate checks.
//!
//! ## Cacheability
//!
//! A response is cacheable when every rule below holds, checked in order;
//! [`Freshness::explain`] reports the first rule that fails.
//!
//! 1. the status is in the [`FreshnessPolicy`] (default 200, 203, 300, 301);
//! 2. no `Cache-Control: no-store` / `no-cache`, no `Pragma: no-cache`;
//! 3. no `Vary` header at all;
//! 4. a freshness signal exists: `max-age`, or `Expires` with a usable `Date`;
//! 5. when relying on `Expires`, it lies in neither the response's nor our past;
//! 6. the response is not [`expired`](Freshness::expired).

use std::borrow::Cow;

use chrono::{DateTime, TimeDelta, Utc};
use http::StatusCode;
use tracing::trace;

use crate::cache_control::{CacheControl, pragma_no_cache};
use crate::headers::Headers;

const DEFAULT_CACHEABLE_STATUSES: [StatusCode; 4] = [
    StatusCode::OK,
    StatusCode::NON_AUTHORITATIVE_INFORMATION,
    StatusCode::MULTIPLE_CHOICES,
    StatusCode::MOVED_PERMANENTLY,
];

static DEFAULT_POLICY: FreshnessPolicy = FreshnessPolicy {
    statuses: Cow::Borrowed(&DEFAULT_CACHEABLE_STATUSES),
};

/// Which status codes may be cached at all.
///
/// The default set is 200, 203, 300 and 301, the codes browsers treat as
/// cacheable without explicit freshness information. Everything else,
/// including 206 and every 4xx/5xx, is rejected before any header is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshnessPolicy {
    statuses: Cow<'static, [StatusCode]>,
}

impl FreshnessPolicy {
    /// Creates a policy accepting exactly `statuses`.
    pub fn new(statuses: impl IntoIterator<Item = StatusCode>) -> Self {
        FreshnessPolicy {
            statuses: Cow::Owned(statuses.into_iter().collect()),
        }
    }

    /// The accepted status codes.
    #[inline]
    pub fn statuses(&self) -> &[StatusCode] {
        &self.statuses
    }

    /// Whether `status` may be cached under this policy.
    #[inline]
    pub fn is_cacheable_status(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status)
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        DEFAULT_POLICY.clone()
    }
}

/// Why a response is not cacheable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The status code is outside the [`FreshnessPolicy`].
    Status(StatusCode),
    /// `Cache-Control: no-store`.
    NoStore,
    /// `Cache-Control: no-cache`.
    NoCache,
    /// `Pragma: no-cache`.
    PragmaNoCache,
    /// A `Vary` header is present.
    Vary,
    /// Neither `max-age` nor a usable `Expires` / `Date` pair.
    NoFreshnessSignal,
    /// `Expires` is earlier than the response's own `Date`.
    ExpiresInItsPast,
    /// `Expires` is earlier than our clock.
    ExpiresInOurPast,
    /// Current age has reached the freshness lifetime.
    Expired,
}

impl Reason {
    /// Short, stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Status(_) => "status",
            Reason::NoStore => "no-store",
            Reason::NoCache => "no-cache",
            Reason::PragmaNoCache => "pragma-no-cache",
            Reason::Vary => "vary",
            Reason::NoFreshnessSignal => "no-freshness-signal",
            Reason::ExpiresInItsPast => "expires-in-its-past",
            Reason::ExpiresInOurPast => "expires-in-our-past",
            Reason::Expired => "expired",
        }
    }
}

/// Outcome of [`Freshness::explain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every cacheability rule holds.
    Cacheable,
    /// The first rule that failed.
    NotCacheable(Reason),
}

impl Verdict {
    /// Whether this is [`Verdict::Cacheable`].
    #[inline]
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Verdict::Cacheable)
    }
}

/// Freshness evaluation of one response at one instant.
///
/// # Examples
///
/// ```
/// use cachet_core::{Freshness, Headers, format_http_date};
/// use chrono::{TimeDelta, Utc};
/// use http::{HeaderMap, StatusCode};
///
/// let now = Utc::now();
/// let mut map = HeaderMap::new();
/// map.insert("date", format_http_date(now).parse().unwrap());
/// map.insert(
///     "expires",
///     format_http_date(now + TimeDelta::minutes(30)).parse().unwrap(),
/// );
///
/// let freshness = Freshness::new(Headers::new(&map), StatusCode::OK, now);
/// assert_eq!(freshness.freshness_lifetime(), Some(TimeDelta::minutes(30)));
/// assert!(!freshness.expired());
/// assert!(freshness.cacheable());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Freshness<'a> {
    headers: Headers<'a>,
    status: StatusCode,
    now: DateTime<Utc>,
    policy: &'a FreshnessPolicy,
}

impl<'a> Freshness<'a> {
    /// Evaluates `headers` of a `status` response as of `now`, under the
    /// default [`FreshnessPolicy`].
    pub fn new(headers: Headers<'a>, status: StatusCode, now: DateTime<Utc>) -> Self {
        Freshness {
            headers,
            status,
            now,
            policy: &DEFAULT_POLICY,
        }
    }

    /// Replaces the status policy.
    pub fn with_policy(mut self, policy: &'a FreshnessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The instant this evaluation treats as "now".
    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Parsed `Cache-Control` directives.
    pub fn cache_control(&self) -> CacheControl {
        CacheControl::from_headers(&self.headers)
    }

    /// The `max-age` directive, if well-formed.
    pub fn max_age(&self) -> Option<u64> {
        self.cache_control().max_age
    }

    /// The `Date` header.
    pub fn response_date(&self) -> Option<DateTime<Utc>> {
        self.headers.date("date")
    }

    /// The `Expires` header.
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.headers.date("expires")
    }

    /// The `Last-Modified` header.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.headers.date("last-modified")
    }

    /// The `Age` header, in seconds.
    pub fn age(&self) -> Option<u64> {
        self.headers.seconds("age")
    }

    /// How long the response stays fresh after it was issued.
    ///
    /// `max-age` always wins over `Expires`. Without `max-age` the lifetime is
    /// `Expires - Date`, with `now` standing in for a missing `Date`. Returns
    /// `None` when there is no usable signal, including a `Date` header that
    /// is present but unparsable. The result is negative when `Expires`
    /// precedes `Date`.
    pub fn freshness_lifetime(&self) -> Option<TimeDelta> {
        if let Some(max_age) = self.max_age() {
            return Some(delta_seconds(max_age));
        }
        let expires = self.expires()?;
        let issued = self.issued_at()?;
        Some(expires - issued)
    }

    /// Best estimate of the time elapsed since the origin produced the response.
    ///
    /// The apparent age `now - Date` is clamped at zero (and is zero when
    /// `Date` is unusable). An `Age` header reported by an intermediary wins
    /// when it is larger.
    pub fn current_age(&self) -> TimeDelta {
        let apparent = self
            .response_date()
            .map(|date| (self.now - date).max(TimeDelta::zero()))
            .unwrap_or_else(TimeDelta::zero);

        match self.age() {
            Some(age) => apparent.max(delta_seconds(age)),
            None => apparent,
        }
    }

    /// Whether the response has outlived its freshness lifetime.
    ///
    /// A response without a determinable lifetime is expired.
    pub fn expired(&self) -> bool {
        match self.freshness_lifetime() {
            Some(lifetime) => self.current_age() >= lifetime,
            None => true,
        }
    }

    /// `Expires >= Date`: the response was not already stale when the origin
    /// says it issued it.
    ///
    /// False when `Expires` is unusable or `Date` is present but unparsable;
    /// a missing `Date` is replaced by `now`.
    pub fn expires_not_in_its_past(&self) -> bool {
        match (self.expires(), self.issued_at()) {
            (Some(expires), Some(issued)) => expires >= issued,
            _ => false,
        }
    }

    /// `Expires >= now`: the response is not stale by our own clock.
    pub fn expires_not_in_our_past(&self) -> bool {
        self.expires().is_some_and(|expires| expires >= self.now)
    }

    /// Whether a validator (`Last-Modified` or `ETag`) allows a conditional
    /// re-request.
    pub fn can_be_validated(&self) -> bool {
        self.headers.contains("last-modified") || self.headers.contains("etag")
    }

    /// Whether the response may be stored and served from a cache.
    pub fn cacheable(&self) -> bool {
        self.explain().is_cacheable()
    }

    /// Checks every cacheability rule and reports the first that fails.
    pub fn explain(&self) -> Verdict {
        let verdict = self.verdict();
        trace!(status = %self.status, ?verdict, "freshness evaluated");
        verdict
    }

    fn verdict(&self) -> Verdict {
        if !self.policy.is_cacheable_status(self.status) {
            return Verdict::NotCacheable(Reason::Status(self.status));
        }

        let directives = self.cache_control();
        if directives.no_store {
            return Verdict::NotCacheable(Reason::NoStore);
        }
        if directives.no_cache {
            return Verdict::NotCacheable(Reason::NoCache);
        }
        if pragma_no_cache(&self.headers) {
            return Verdict::NotCacheable(Reason::PragmaNoCache);
        }
        if self.headers.contains("vary") {
            return Verdict::NotCacheable(Reason::Vary);
        }

        if directives.max_age.is_none() {
            if self.expires().is_none() || self.issued_at().is_none() {
                return Verdict::NotCacheable(Reason::NoFreshnessSignal);
            }
            if !self.expires_not_in_its_past() {
                return Verdict::NotCacheable(Reason::ExpiresInItsPast);
            }
            if !self.expires_not_in_our_past() {
                return Verdict::NotCacheable(Reason::ExpiresInOurPast);
            }
        }

        if self.expired() {
            return Verdict::NotCacheable(Reason::Expired);
        }
        Verdict::Cacheable
    }

    /// The baseline `Expires` is measured from: `Date` when present, `now`
    /// when absent, nothing when present but unparsable.
    fn issued_at(&self) -> Option<DateTime<Utc>> {
        if self.headers.contains("date") {
            self.response_date()
        } else {
            Some(self.now)
        }
    }
}

fn delta_seconds(seconds: u64) -> TimeDelta {
    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}
