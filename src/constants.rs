//! Constants shared by the ZITADEL client.

/// Environment variable read by [`Issuer::from_env`](crate::Issuer::from_env).
///
/// Holds the issuer URL of the ZITADEL instance, e.g. `https://my-instance.zitadel.cloud`.
pub const ISSUER_ENV: &str = "ZITADEL_ISSUER";

/// The `openid` scope.
pub const SCOPE_OPENID: &str = "openid";

/// Scope that puts the ZITADEL API project into the token audience.
///
/// Tokens used against the ZITADEL gRPC APIs must carry this scope.
pub const SCOPE_ZITADEL_API: &str = "urn:zitadel:iam:org:project:id:zitadel:aud";

/// Port used when TLS is enabled and no port is given.
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Port used when TLS is disabled and no port is given.
pub const DEFAULT_PLAINTEXT_PORT: u16 = 80;

/// Path of the OpenID Connect discovery document, relative to the issuer origin.
pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";
