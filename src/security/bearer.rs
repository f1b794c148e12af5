//! Bearer token guard.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderValue},
};

use crate::http::error::RelayError;

/// Detail returned with every 401.
pub const MISSING_BEARER_MESSAGE: &str = "Missing Google OAuth Bearer token";

const SCHEME: &str = "bearer ";

/// The caller's `Authorization` header, checked for a bearer scheme.
///
/// The value is kept exactly as received so it can be forwarded upstream
/// byte-for-byte.
#[derive(Clone)]
pub struct BearerToken(HeaderValue);

impl BearerToken {
    /// Pull the bearer credential out of request headers.
    ///
    /// Accepts any casing of the `Bearer ` prefix. Values that are absent,
    /// not visible ASCII, or use another scheme are rejected.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?;
        let text = value.to_str().ok()?;
        let scheme = text.get(..SCHEME.len())?;
        scheme
            .eq_ignore_ascii_case(SCHEME)
            .then(|| Self(value.clone()))
    }

    /// The header value to send upstream.
    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = RelayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "Rejected request without bearer token");
            RelayError::MissingBearer
        })
    }
}
