//! Client credentials grant for service users with a client secret.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::endpoint::{BasicAuth, TokenEndpoint};
use super::{AccessToken, TokenError, TokenExchange};

const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Exchanges a service user's client id and secret for access tokens.
pub struct ClientCredentialsExchange {
    client_id: String,
    client_secret: Zeroizing<String>,
    scope: String,
    endpoint: TokenEndpoint,
}

impl ClientCredentialsExchange {
    pub(crate) fn new(
        client_id: String,
        client_secret: Zeroizing<String>,
        scopes: &[String],
        endpoint: TokenEndpoint,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            scope: scopes.join(" "),
            endpoint,
        }
    }
}

#[async_trait]
impl TokenExchange for ClientCredentialsExchange {
    async fn exchange(&self) -> Result<AccessToken, TokenError> {
        let mut form = vec![("grant_type", CLIENT_CREDENTIALS_GRANT)];
        if !self.scope.is_empty() {
            form.push(("scope", self.scope.as_str()));
        }
        let basic = BasicAuth {
            client_id: &self.client_id,
            client_secret: self.client_secret.as_str(),
        };
        self.endpoint.request(&form, Some(basic)).await
    }
}

impl fmt::Debug for ClientCredentialsExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsExchange")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .finish()
    }
}
