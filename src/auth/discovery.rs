use serde::Deserialize;
use url::Url;

use super::TokenError;
use crate::constants::DISCOVERY_PATH;

/// Minimal subset of the OpenID Connect discovery document.
#[derive(Deserialize)]
struct DiscoveryDocument {
    token_endpoint: String,
}

/// Resolves the token endpoint advertised by `issuer_origin`.
///
/// Fetches `{issuer_origin}/.well-known/openid-configuration` once and extracts
/// `token_endpoint`.
pub(crate) async fn discover_token_endpoint(
    http: &reqwest::Client,
    issuer_origin: &str,
) -> Result<Url, TokenError> {
    let base = issuer_origin.trim_end_matches('/');
    let discovery_url = format!("{base}{DISCOVERY_PATH}");

    let doc: DiscoveryDocument = http
        .get(&discovery_url)
        .send()
        .await
        .map_err(|e| TokenError::Http(format!("OIDC discovery request failed: {e}")))?
        .error_for_status()
        .map_err(|e| TokenError::Http(format!("OIDC discovery failed: {e}")))?
        .json()
        .await
        .map_err(|e| TokenError::InvalidResponse(format!("OIDC discovery document: {e}")))?;

    Url::parse(&doc.token_endpoint).map_err(|e| {
        TokenError::InvalidResponse(format!(
            "invalid token_endpoint URL in discovery document: {e}"
        ))
    })
}
