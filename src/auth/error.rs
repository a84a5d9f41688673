use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned while initializing a token source or obtaining a token.
///
/// Secret values (private keys, client secrets, access tokens) never appear in the
/// formatted output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenError {
    /// HTTP transport or status error talking to the identity provider.
    #[error("{0}")]
    Http(String),

    /// The identity provider returned an unparseable or incomplete response.
    #[error("invalid token response: {0}")]
    InvalidResponse(String),

    /// The token endpoint rejected the request with an OAuth error.
    #[error("token request rejected: {error}")]
    Rejected {
        /// OAuth error code, e.g. `invalid_grant`.
        error: String,
        /// Optional human-readable description.
        description: Option<String>,
    },

    /// The token endpoint returned a `token_type` that is not `Bearer`.
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// A key file could not be read.
    #[error("failed to read key file {path}: {source}")]
    KeyFile {
        /// Path of the key file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The key material is malformed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Signing the JWT assertion failed.
    #[error("failed to sign assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The token source cannot currently produce a token.
    #[error("token unavailable: {0}")]
    Unavailable(String),

    /// Error raised by a caller-supplied token source.
    #[error(transparent)]
    Other(BoxError),
}

impl TokenError {
    /// Wraps an arbitrary error from a custom token source.
    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }
}
