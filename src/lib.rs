#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

//! Rust client for the [ZITADEL](https://zitadel.com) gRPC APIs.
//!
//! A [`Client`] holds one connection to a ZITADEL instance and hands out typed clients for
//! every API service (system, admin, management, auth and the v2/v2beta resource
//! services). Service clients are built on first use and reused afterwards.
//!
//! Every call carries the credentials configured on the client: a personal access token,
//! a service key (JWT profile grant), a service user's client secret, or any custom
//! [`TokenSource`]. Tokens are refreshed transparently.
//!
//! ```no_run
//! use zitadel_client::{Auth, Client, Issuer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder(Issuer::from_env()?)
//!     .with_auth(Auth::personal_access_token("my-pat"))
//!     .build()
//!     .await?;
//!
//! // AdminService.Healthz takes and returns empty messages.
//! let admin = client.admin_service()?;
//! admin.unary::<(), ()>("Healthz", ()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Transport security
//!
//! TLS is on unless the issuer says otherwise ([`Issuer::insecure`]). Certificate
//! validation uses the OS trust store and can be disabled for test clusters with
//! [`Issuer::insecure_skip_verify_tls`]. Bearer tokens are sent over plaintext
//! connections too, which keeps local development setups working.
//!
//! ## Features
//!
//! - **`logging`** (default): emit records through the `log` crate
//! - **`tracing`**: emit events through `tracing` instead

pub mod auth;
pub mod client;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod issuer;
pub mod pb;
pub mod transport;

mod observability;
mod prelude;

// -----------------------
// Re-exports
// -----------------------

pub use crate::{
    auth::{Auth, TokenError, TokenSource, TokenSourceInitializer},
    client::{Client, ClientBuilder, ServiceInitError},
    credentials::PerRpcCredentials,
    error::{Error, Result},
    issuer::{Issuer, IssuerError},
    transport::{DialOption, TransportError},
};
