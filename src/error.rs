//! Crate-level error type.

use thiserror::Error;

use crate::auth::TokenError;
use crate::client::ServiceInitError;
use crate::issuer::IssuerError;
use crate::transport::TransportError;

/// Errors returned while building a [`Client`](crate::Client) or a standalone service
/// client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The credential provider failed to produce a token source. No connection was made.
    #[error("failed to initialize authentication: {0}")]
    AuthInit(#[source] TokenError),

    /// The gRPC connection could not be established.
    #[error("failed to connect: {0}")]
    Connection(#[from] TransportError),

    /// A service client could not be constructed.
    #[error(transparent)]
    ServiceInit(#[from] ServiceInitError),

    /// The issuer is invalid.
    #[error("invalid issuer: {0}")]
    Issuer(#[from] IssuerError),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_init_renders_cause() {
        let err = Error::AuthInit(TokenError::Unavailable("idp down".into()));
        assert_eq!(
            err.to_string(),
            "failed to initialize authentication: token unavailable: idp down"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn issuer_error_converts() {
        let err: Error = IssuerError::MissingEnv.into();
        assert!(matches!(err, Error::Issuer(IssuerError::MissingEnv)));
    }
}
