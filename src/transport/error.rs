//! Error types for the transport layer (TLS setup and gRPC dial).

use thiserror::Error;

/// Errors produced while building the shared gRPC connection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The issuer domain is not a valid TLS server name.
    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    /// TLS is enabled but the OS trust store yielded no usable root certificate.
    #[error("no native root CA certificates found")]
    NoRootCertificates,

    /// rustls rejected the TLS configuration.
    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),

    /// The issuer does not form a valid URI.
    #[error("invalid connection URI: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),

    /// A dial option carries an invalid value.
    #[error("invalid dial option: {0}")]
    InvalidDialOption(String),

    /// Transport error while connecting.
    #[error(transparent)]
    Tonic(#[from] tonic::transport::Error),
}
