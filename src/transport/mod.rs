//! Transport layer: one multiplexed gRPC connection to a ZITADEL instance.
//!
//! [`connect`] selects transport security from the [`Issuer`](crate::Issuer), applies the
//! caller's [`DialOption`]s in order and always installs the per-RPC credential layer, so
//! every call made over the returned [`AuthenticatedChannel`] carries the configured
//! credentials.

pub mod connector;
pub mod dial;
pub mod error;
mod tls;

pub use connector::{connect, origin, AuthenticatedChannel};
pub use dial::DialOption;
pub use error::TransportError;
