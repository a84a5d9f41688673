//! Credential providers.
//!
//! A [`TokenSourceInitializer`] turns an [`Issuer`] into a [`TokenSource`] once, while
//! the client is being built. [`Auth`] covers the ways ZITADEL hands out credentials:
//!
//! - [`Auth::PersonalAccessToken`]: a fixed bearer token,
//! - [`Auth::JwtProfile`]: a service key exchanged through the JWT profile grant,
//! - [`Auth::Password`]: a service user's client id and secret (client credentials grant),
//! - [`Auth::Custom`]: any caller-supplied initializer.
//!
//! The exchanging variants discover the token endpoint of the issuer and perform the first
//! exchange during initialization, so wrong credentials fail the build instead of the
//! first RPC.

mod client_credentials;
mod discovery;
mod endpoint;
mod error;
mod jwt_profile;
mod refresh;
mod token;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::constants::{SCOPE_OPENID, SCOPE_ZITADEL_API};
use crate::issuer::Issuer;
use crate::prelude::info;

pub use client_credentials::ClientCredentialsExchange;
pub use error::TokenError;
pub use jwt_profile::{JwtProfileExchange, ServiceKey};
pub use refresh::{RefreshingTokenSource, TokenExchange, DEFAULT_EXPIRY_MARGIN};
pub use token::{AccessToken, StaticTokenSource, TokenSource};

use endpoint::TokenEndpoint;

/// Produces a [`TokenSource`] for an issuer.
#[async_trait]
pub trait TokenSourceInitializer: Send + Sync + 'static {
    /// Builds the token source. Called once per client build.
    async fn init(&self, issuer: &Issuer) -> Result<Arc<dyn TokenSource>, TokenError>;
}

/// Authentication option for [`ClientBuilder::with_auth`](crate::ClientBuilder::with_auth).
#[derive(Clone)]
#[non_exhaustive]
pub enum Auth {
    /// Personal access token of a service user.
    PersonalAccessToken(Zeroizing<String>),

    /// Service key exchanged through the JWT profile grant.
    JwtProfile {
        /// Private key downloaded from ZITADEL.
        key: ServiceKey,
        /// Requested scopes.
        scopes: Vec<String>,
    },

    /// Client id and secret of a service user.
    Password {
        /// Client id of the service user.
        client_id: String,
        /// Client secret of the service user.
        client_secret: Zeroizing<String>,
        /// Requested scopes.
        scopes: Vec<String>,
    },

    /// Caller-supplied initializer.
    Custom(Arc<dyn TokenSourceInitializer>),
}

impl Auth {
    /// Authenticates with a personal access token.
    pub fn personal_access_token(token: impl Into<String>) -> Self {
        Self::PersonalAccessToken(Zeroizing::new(token.into()))
    }

    /// Authenticates with a service key and the given scopes.
    pub fn jwt_profile<I, S>(key: ServiceKey, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::JwtProfile {
            key,
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Authenticates with a service user's client id and secret.
    pub fn password<I, S>(client_id: impl Into<String>, client_secret: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Password {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Authenticates with a caller-supplied initializer.
    pub fn custom(initializer: impl TokenSourceInitializer) -> Self {
        Self::Custom(Arc::new(initializer))
    }

    /// Service key from `path` with the scopes needed to call the ZITADEL APIs
    /// (`openid` and the ZITADEL project audience).
    ///
    /// ## Errors
    ///
    /// Returns a [`TokenError`] if the key file cannot be read or parsed.
    pub fn default_service_user(path: impl AsRef<Path>) -> Result<Self, TokenError> {
        Ok(Self::jwt_profile(
            ServiceKey::from_file(path)?,
            [SCOPE_OPENID, SCOPE_ZITADEL_API],
        ))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::PersonalAccessToken(_) => "personal access token",
            Self::JwtProfile { .. } => "JWT profile",
            Self::Password { .. } => "client credentials",
            Self::Custom(_) => "custom",
        }
    }
}

#[async_trait]
impl TokenSourceInitializer for Auth {
    async fn init(&self, issuer: &Issuer) -> Result<Arc<dyn TokenSource>, TokenError> {
        info!("initializing {} token source for {issuer}", self.kind());

        let source: Arc<dyn TokenSource> = match self {
            Self::PersonalAccessToken(token) => {
                if token.is_empty() {
                    return Err(TokenError::InvalidKey("personal access token is empty".into()));
                }
                Arc::new(StaticTokenSource::new(AccessToken::bearer(token.as_str())))
            }
            Self::JwtProfile { key, scopes } => {
                let endpoint = TokenEndpoint::discover(issuer).await?;
                let exchange =
                    JwtProfileExchange::new(key.clone(), issuer.origin(), scopes, endpoint)?;
                Arc::new(RefreshingTokenSource::prime(exchange).await?)
            }
            Self::Password {
                client_id,
                client_secret,
                scopes,
            } => {
                let endpoint = TokenEndpoint::discover(issuer).await?;
                let exchange = ClientCredentialsExchange::new(
                    client_id.clone(),
                    client_secret.clone(),
                    scopes,
                    endpoint,
                );
                Arc::new(RefreshingTokenSource::prime(exchange).await?)
            }
            Self::Custom(initializer) => initializer.init(issuer).await?,
        };
        Ok(source)
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PersonalAccessToken(_) => f
                .debug_tuple("PersonalAccessToken")
                .field(&"[REDACTED]")
                .finish(),
            Self::JwtProfile { key, scopes } => f
                .debug_struct("JwtProfile")
                .field("key", key)
                .field("scopes", scopes)
                .finish(),
            Self::Password {
                client_id, scopes, ..
            } => f
                .debug_struct("Password")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .field("scopes", scopes)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn personal_access_token_is_static() {
        let auth = Auth::personal_access_token("pat-1");
        let source = auth.init(&Issuer::new("id.example.com")).await.unwrap();
        assert_eq!(source.token().await.unwrap().secret(), "pat-1");
    }

    #[tokio::test]
    async fn empty_personal_access_token_is_rejected() {
        let auth = Auth::personal_access_token("");
        assert!(auth.init(&Issuer::new("id.example.com")).await.is_err());
    }

    #[test]
    fn default_service_user_requests_api_scopes() {
        let auth = Auth::default_service_user(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/testdata/keys/service-user.json"
        ))
        .unwrap();
        match auth {
            Auth::JwtProfile { scopes, .. } => {
                assert_eq!(scopes, vec![SCOPE_OPENID, SCOPE_ZITADEL_API]);
            }
            other => panic!("unexpected auth: {other:?}"),
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let pat = format!("{:?}", Auth::personal_access_token("pat-secret"));
        assert!(!pat.contains("pat-secret"));

        let password = format!("{:?}", Auth::password("svc", "pw-secret", ["openid"]));
        assert!(password.contains("svc"));
        assert!(!password.contains("pw-secret"));
    }
}
