//! The ZITADEL API client.
//!
//! A [`Client`] owns one connection and lazily builds a typed stub per API service on
//! first access. Stubs are cached for the client's lifetime and share the connection.
//!
//! # Examples
//!
//! ```no_run
//! use zitadel_client::{Auth, Client, Issuer};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder(Issuer::parse("https://id.example.com")?)
//!     .with_auth(Auth::default_service_user("key.json")?)
//!     .build()
//!     .await?;
//!
//! let admin = client.admin_service()?;
//! assert!(std::ptr::eq(admin, client.admin_service()?));
//! # Ok(())
//! # }
//! ```

mod error;
pub mod services;
mod slot;

use std::fmt;

use tonic::transport::Uri;

use crate::auth::{Auth, TokenSourceInitializer};
use crate::credentials::PerRpcCredentials;
use crate::error::Error;
use crate::issuer::Issuer;
use crate::prelude::{debug, info};
use crate::transport::{self, AuthenticatedChannel, DialOption};

pub use error::ServiceInitError;
pub use services::*;
use slot::Slot;

/// Configures and connects a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    issuer: Issuer,
    auth: Option<Auth>,
    dial_options: Vec<DialOption>,
}

impl ClientBuilder {
    /// Starts a builder for `issuer` without authentication.
    pub fn new(issuer: Issuer) -> Self {
        Self {
            issuer,
            auth: None,
            dial_options: Vec::new(),
        }
    }

    /// Sets the credential provider. Without one, calls are sent unauthenticated.
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Appends connection options. Repeated calls accumulate in order.
    #[must_use]
    pub fn with_dial_options(mut self, options: impl IntoIterator<Item = DialOption>) -> Self {
        self.dial_options.extend(options);
        self
    }

    /// The target issuer.
    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    /// Accumulated connection options, in application order.
    pub fn dial_options(&self) -> &[DialOption] {
        &self.dial_options
    }

    /// Initializes authentication, connects and returns the client.
    ///
    /// The token source is initialized before any connection is attempted.
    ///
    /// ## Errors
    ///
    /// - [`Error::AuthInit`] if the credential provider fails,
    /// - [`Error::Connection`] if the connection cannot be established.
    pub async fn build(self) -> Result<Client, Error> {
        let (transport, origin) = self.connect_transport().await?;
        Ok(Client::from_transport(transport, origin))
    }

    pub(crate) async fn connect_transport(self) -> Result<(AuthenticatedChannel, Uri), Error> {
        let token_source = match &self.auth {
            Some(auth) => Some(auth.init(&self.issuer).await.map_err(Error::AuthInit)?),
            None => None,
        };

        let credentials = PerRpcCredentials::new(self.issuer.is_tls(), token_source);
        let origin = transport::origin(&self.issuer)?;
        let channel = transport::connect(&self.issuer, credentials, &self.dial_options).await?;

        info!("connected to ZITADEL at {}", self.issuer);
        Ok((channel, origin))
    }
}

/// Handle to the ZITADEL APIs.
///
/// Service accessors are safe to call from any number of threads. The first call for a
/// service constructs its stub exactly once; every later call returns the same instance.
pub struct Client<T = AuthenticatedChannel> {
    transport: T,
    origin: Uri,
    system: Slot<SystemServiceClient<T>>,
    admin: Slot<AdminServiceClient<T>>,
    management: Slot<ManagementServiceClient<T>>,
    auth: Slot<AuthServiceClient<T>>,
    user_v2beta: Slot<UserServiceV2BetaClient<T>>,
    user_v2: Slot<UserServiceV2Client<T>>,
    settings_v2beta: Slot<SettingsServiceV2BetaClient<T>>,
    settings_v2: Slot<SettingsServiceV2Client<T>>,
    session_v2beta: Slot<SessionServiceV2BetaClient<T>>,
    session_v2: Slot<SessionServiceV2Client<T>>,
    organization_v2beta: Slot<OrganizationServiceV2BetaClient<T>>,
    organization_v2: Slot<OrganizationServiceV2Client<T>>,
    oidc_v2beta: Slot<OidcServiceV2BetaClient<T>>,
    oidc_v2: Slot<OidcServiceV2Client<T>>,
}

impl Client {
    /// Starts configuring a client for `issuer`.
    pub fn builder(issuer: Issuer) -> ClientBuilder {
        ClientBuilder::new(issuer)
    }

    /// Connects an unauthenticated client to `issuer`.
    ///
    /// ## Errors
    ///
    /// See [`ClientBuilder::build`].
    pub async fn new(issuer: Issuer) -> Result<Self, Error> {
        ClientBuilder::new(issuer).build().await
    }

    /// Credentials attached to every call of this client.
    pub fn credentials(&self) -> &PerRpcCredentials {
        self.transport.credentials()
    }
}

macro_rules! slots {
    ($($field:ident => $stub:ident),* $(,)?) => {
        fn empty_slots(transport: T, origin: Uri) -> Self {
            Self {
                transport,
                origin,
                $($field: Slot::new(<$stub<T> as ServiceStub<T>>::SERVICE_NAME),)*
            }
        }
    };
}

macro_rules! accessors {
    ($($(#[$meta:meta])* $method:ident => $field:ident: $stub:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            ///
            /// ## Errors
            ///
            /// Returns [`ServiceInitError`] if the stub cannot be constructed; the next
            /// call retries.
            pub fn $method(&self) -> Result<&$stub<T>, ServiceInitError> {
                self.stub(&self.$field)
            }
        )*
    };
}

impl<T: Clone> Client<T> {
    /// Wraps an existing transport, e.g. a [`CredentialsService`] around a custom channel.
    ///
    /// Calls are addressed to `origin` (`scheme://authority`).
    ///
    /// [`CredentialsService`]: crate::credentials::CredentialsService
    pub fn from_transport(transport: T, origin: Uri) -> Self {
        Self::empty_slots(transport, origin)
    }

    slots! {
        system => SystemServiceClient,
        admin => AdminServiceClient,
        management => ManagementServiceClient,
        auth => AuthServiceClient,
        user_v2beta => UserServiceV2BetaClient,
        user_v2 => UserServiceV2Client,
        settings_v2beta => SettingsServiceV2BetaClient,
        settings_v2 => SettingsServiceV2Client,
        session_v2beta => SessionServiceV2BetaClient,
        session_v2 => SessionServiceV2Client,
        organization_v2beta => OrganizationServiceV2BetaClient,
        organization_v2 => OrganizationServiceV2Client,
        oidc_v2beta => OidcServiceV2BetaClient,
        oidc_v2 => OidcServiceV2Client,
    }

    /// The shared transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Origin all calls are addressed to.
    pub fn origin(&self) -> &Uri {
        &self.origin
    }

    fn stub<'a, S: ServiceStub<T>>(&'a self, slot: &'a Slot<S>) -> Result<&'a S, ServiceInitError> {
        slot.get_or_try_init(|| {
            debug!("constructing {} client", S::SERVICE_NAME);
            S::from_transport(self.transport.clone(), self.origin.clone())
        })
    }

    accessors! {
        /// System API (instance administration, requires system user credentials).
        system_service => system: SystemServiceClient,
        /// Admin API (instance-level settings).
        admin_service => admin: AdminServiceClient,
        /// Management API (organization-level resources).
        management_service => management: ManagementServiceClient,
        /// Auth API (the authenticated user's own data).
        auth_service => auth: AuthServiceClient,
        /// User service, v2beta.
        user_service_v2beta => user_v2beta: UserServiceV2BetaClient,
        /// User service, v2.
        user_service_v2 => user_v2: UserServiceV2Client,
        /// Settings service, v2beta.
        settings_service_v2beta => settings_v2beta: SettingsServiceV2BetaClient,
        /// Settings service, v2.
        settings_service_v2 => settings_v2: SettingsServiceV2Client,
        /// Session service, v2beta.
        session_service_v2beta => session_v2beta: SessionServiceV2BetaClient,
        /// Session service, v2.
        session_service_v2 => session_v2: SessionServiceV2Client,
        /// Organization service, v2beta.
        organization_service_v2beta => organization_v2beta: OrganizationServiceV2BetaClient,
        /// Organization service, v2.
        organization_service_v2 => organization_v2: OrganizationServiceV2Client,
        /// OIDC service, v2beta.
        oidc_service_v2beta => oidc_v2beta: OidcServiceV2BetaClient,
        /// OIDC service, v2.
        oidc_service_v2 => oidc_v2: OidcServiceV2Client,
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initialized = [
            self.system.get().is_some(),
            self.admin.get().is_some(),
            self.management.get().is_some(),
            self.auth.get().is_some(),
            self.user_v2beta.get().is_some(),
            self.user_v2.get().is_some(),
            self.settings_v2beta.get().is_some(),
            self.settings_v2.get().is_some(),
            self.session_v2beta.get().is_some(),
            self.session_v2.get().is_some(),
            self.organization_v2beta.get().is_some(),
            self.organization_v2.get().is_some(),
            self.oidc_v2beta.get().is_some(),
            self.oidc_v2.get().is_some(),
        ]
        .iter()
        .filter(|ready| **ready)
        .count();

        f.debug_struct("Client")
            .field("origin", &self.origin)
            .field("initialized_services", &initialized)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Dummy;

    fn client() -> Client<Dummy> {
        Client::from_transport(Dummy, Uri::from_static("https://id.example.com"))
    }

    #[test]
    fn accessor_returns_same_instance() {
        let client = client();
        let first = client.admin_service().unwrap();
        let second = client.admin_service().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn accessors_are_independent() {
        let client = client();
        assert_eq!(
            client.user_service_v2().unwrap().service_name(),
            "zitadel.user.v2.UserService"
        );
        assert_eq!(
            client.user_service_v2beta().unwrap().service_name(),
            "zitadel.user.v2beta.UserService"
        );
        assert!(client.admin.get().is_none());
        assert!(format!("{client:?}").contains("initialized_services: 2"));
    }

    #[test]
    fn dial_options_accumulate_in_order() {
        use std::time::Duration;

        let builder = Client::builder(Issuer::new("id.example.com"))
            .with_dial_options([DialOption::Timeout(Duration::from_secs(1))])
            .with_dial_options([DialOption::Lazy, DialOption::TcpNodelay(false)]);

        let rendered: Vec<String> = builder
            .dial_options()
            .iter()
            .map(|o| format!("{o:?}"))
            .collect();
        assert_eq!(rendered, ["Timeout(1s)", "Lazy", "TcpNodelay(false)"]);
    }
}
