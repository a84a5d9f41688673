use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::{ArcSwap, ArcSwapOption};
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{AccessToken, TokenError, TokenSource};
use crate::prelude::{debug, warn};

/// Default margin before expiry at which a cached token is replaced.
pub const DEFAULT_EXPIRY_MARGIN: Duration = Duration::from_secs(10);

/// One round-trip to the identity provider yielding a fresh token.
#[async_trait]
pub trait TokenExchange: Send + Sync + 'static {
    /// Obtains a new token.
    async fn exchange(&self) -> Result<AccessToken, TokenError>;
}

/// Caching token source that refreshes through a [`TokenExchange`].
///
/// Reads are lock-free while the cached token is fresh. When it is about to expire,
/// concurrent callers coalesce behind one exchange instead of each contacting the
/// identity provider. Callers that queued behind a failed exchange receive its error
/// instead of retrying one after another; the next call after that tries again.
pub struct RefreshingTokenSource<E> {
    exchange: E,
    // Protected by Mutex to prevent concurrent exchanges.
    cached: ArcSwap<Option<Arc<AccessToken>>>,
    refresh_mutex: Mutex<()>,
    // Bumped after every exchange, successful or not.
    attempts: AtomicU64,
    last_failure: ArcSwapOption<String>,
    margin: Duration,
}

impl<E: TokenExchange> RefreshingTokenSource<E> {
    /// Creates a source with an empty cache.
    pub fn new(exchange: E) -> Self {
        Self {
            exchange,
            cached: ArcSwap::from(Arc::new(None)),
            refresh_mutex: Mutex::new(()),
            attempts: AtomicU64::new(0),
            last_failure: ArcSwapOption::empty(),
            margin: DEFAULT_EXPIRY_MARGIN,
        }
    }

    /// Overrides how long before expiry a token is replaced.
    #[must_use]
    pub fn with_expiry_margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    /// Creates a source and performs the first exchange, so that bad credentials surface
    /// before any RPC is made.
    ///
    /// ## Errors
    ///
    /// Returns the exchange error.
    pub async fn prime(exchange: E) -> Result<Self, TokenError> {
        let source = Self::new(exchange);
        source.refresh().await?;
        Ok(source)
    }

    fn fresh(&self) -> Option<AccessToken> {
        let cached = self.cached.load();
        cached
            .as_ref()
            .as_ref()
            .filter(|token| !token.expires_within(self.margin))
            .map(|token| AccessToken::clone(token))
    }

    async fn refresh(&self) -> Result<AccessToken, TokenError> {
        let result = self.exchange.exchange().await;
        match &result {
            Ok(token) => {
                self.cached.store(Arc::new(Some(Arc::new(token.clone()))));
                self.last_failure.store(None);
                debug!("obtained access token (expires at {:?})", token.expires_at());
            }
            Err(err) => {
                warn!("access token exchange failed: {err}");
                self.last_failure.store(Some(Arc::new(err.to_string())));
            }
        }
        self.attempts.fetch_add(1, Ordering::AcqRel);
        result
    }
}

#[async_trait]
impl<E: TokenExchange> TokenSource for RefreshingTokenSource<E> {
    async fn token(&self) -> Result<AccessToken, TokenError> {
        // Fast path: cached token still fresh
        if let Some(token) = self.fresh() {
            return Ok(token);
        }

        let observed = self.attempts.load(Ordering::Acquire);
        let _guard = self.refresh_mutex.lock().await;

        // Double-check: another task might have refreshed while we waited
        if let Some(token) = self.fresh() {
            return Ok(token);
        }

        // An exchange finished while we waited and did not yield a fresh token
        if self.attempts.load(Ordering::Acquire) != observed {
            if let Some(reason) = self.last_failure.load_full() {
                return Err(TokenError::Unavailable(format!(
                    "token refresh failed: {reason}"
                )));
            }
        }

        self.refresh().await
    }
}

impl<E: fmt::Debug> fmt::Debug for RefreshingTokenSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshingTokenSource")
            .field("exchange", &self.exchange)
            .field("cached", &self.cached.load().is_some())
            .field("margin", &self.margin)
            .finish()
    }
}
