use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use zeroize::Zeroizing;

use super::TokenError;

/// Bearer access token.
///
/// The token value is zeroized on drop and redacted from `Debug` output.
#[derive(Clone)]
pub struct AccessToken {
    secret: Zeroizing<String>,
    expires_at: Option<Instant>,
}

impl AccessToken {
    /// A bearer token that never expires.
    pub fn bearer(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            expires_at: None,
        }
    }

    /// Sets the expiry to `lifetime` from now.
    ///
    /// A lifetime too large to represent as an instant leaves the token non-expiring.
    #[must_use]
    pub fn expires_in(mut self, lifetime: Duration) -> Self {
        self.expires_at = Instant::now().checked_add(lifetime);
        self
    }

    /// The raw token value. Do not log it.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Instant after which the token is no longer accepted, if known.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Whether the token expires within `margin` from now.
    pub fn expires_within(&self, margin: Duration) -> bool {
        let Some(at) = self.expires_at else {
            return false;
        };
        // A margin past the end of representable time covers every expiry.
        Instant::now()
            .checked_add(margin)
            .map_or(true, |deadline| at <= deadline)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Producer of bearer tokens.
///
/// Called once per RPC and possibly from many tasks at once. Implementations own caching
/// and refresh; [`RefreshingTokenSource`](super::RefreshingTokenSource) provides both
/// for any [`TokenExchange`](super::TokenExchange).
#[async_trait]
pub trait TokenSource: Send + Sync + 'static {
    /// Returns a token valid for the next call.
    async fn token(&self) -> Result<AccessToken, TokenError>;
}

/// Token source returning the same token forever (personal access tokens).
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: AccessToken,
}

impl StaticTokenSource {
    /// Wraps a fixed token.
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<AccessToken, TokenError> {
        Ok(self.token.clone())
    }
}
