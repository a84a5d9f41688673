//! Per-RPC bearer credentials.
//!
//! [`PerRpcCredentials`] pairs the issuer's TLS flag with an optional
//! [`TokenSource`]: when a source is present every call carries
//! `authorization: Bearer <token>`, when it is absent calls go out unauthenticated.
//!
//! The credentials require transport security exactly when the issuer uses TLS, so a
//! plaintext development instance can still receive bearer tokens.
//!
//! [`CredentialsLayer`] installs the credentials on any tower service speaking
//! `http::Request`, which is how [`transport::connect`](crate::transport::connect) wraps the
//! shared channel.

mod layer;
mod timeout;

use std::fmt;
use std::sync::Arc;

use http::uri::Scheme;
use http::{HeaderValue, Uri};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::auth::{TokenError, TokenSource};

pub use layer::{CredentialsLayer, CredentialsService};

/// Credential injector configured once per connection.
#[derive(Clone)]
pub struct PerRpcCredentials {
    tls: bool,
    token_source: Option<Arc<dyn TokenSource>>,
}

/// Errors returned while producing request metadata.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CredentialFetchError {
    /// The token source failed.
    #[error("failed to fetch access token: {0}")]
    Token(#[from] TokenError),

    /// The call deadline expired before a token was available.
    #[error("deadline exceeded while fetching access token")]
    DeadlineExceeded,

    /// The token contains bytes that are not valid in an HTTP header.
    #[error("access token is not a valid header value")]
    InvalidHeaderValue,

    /// The credentials require TLS but the call targets a plaintext origin.
    #[error("credentials require transport level security")]
    InsecureTransport,
}

impl PerRpcCredentials {
    /// Creates credentials for a connection with the given TLS setting.
    pub fn new(tls: bool, token_source: Option<Arc<dyn TokenSource>>) -> Self {
        Self { tls, token_source }
    }

    /// Credentials that attach nothing.
    pub fn anonymous(tls: bool) -> Self {
        Self::new(tls, None)
    }

    /// Whether these credentials must only be sent over an encrypted transport.
    ///
    /// Mirrors the issuer's TLS flag.
    pub const fn require_transport_security(&self) -> bool {
        self.tls
    }

    /// Whether a token source is configured.
    pub fn has_token_source(&self) -> bool {
        self.token_source.is_some()
    }

    /// Produces the `authorization` header value for one call to `uri`.
    ///
    /// Returns `Ok(None)` when no token source is configured. The transport security
    /// requirement applies either way. Every call asks the source
    /// for a token; caching and refresh are the source's concern.
    ///
    /// ## Errors
    ///
    /// - [`CredentialFetchError::InsecureTransport`] if security is required and `uri` has
    ///   the `http` scheme,
    /// - [`CredentialFetchError::Token`] if the token source fails,
    /// - [`CredentialFetchError::InvalidHeaderValue`] if the token is not header-safe.
    pub async fn request_metadata(
        &self,
        uri: &Uri,
    ) -> Result<Option<HeaderValue>, CredentialFetchError> {
        if self.tls && uri.scheme() == Some(&Scheme::HTTP) {
            return Err(CredentialFetchError::InsecureTransport);
        }

        let Some(source) = &self.token_source else {
            return Ok(None);
        };

        let token = source.token().await?;
        let raw = Zeroizing::new(format!("Bearer {}", token.secret()));
        let mut value =
            HeaderValue::from_str(&raw).map_err(|_| CredentialFetchError::InvalidHeaderValue)?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

impl fmt::Debug for PerRpcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerRpcCredentials")
            .field("tls", &self.tls)
            .field("token_source", &self.token_source.is_some())
            .finish()
    }
}

impl From<CredentialFetchError> for tonic::Status {
    fn from(err: CredentialFetchError) -> Self {
        match err {
            CredentialFetchError::DeadlineExceeded => tonic::Status::deadline_exceeded(err.to_string()),
            other => tonic::Status::unauthenticated(other.to_string()),
        }
    }
}
