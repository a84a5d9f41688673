//! Per-service gRPC clients.
//!
//! Every ZITADEL API service gets a thin typed stub around one [`ServiceClient`], which
//! issues calls by fully qualified method name with the prost codec. All stubs share the
//! transport they are built from.

use std::fmt;
use std::ops::Deref;

use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::{Body, Bytes, StdError};
use tonic::transport::Uri;
use tonic::{GrpcMethod, IntoRequest, Response, Status, Streaming};

use super::{ClientBuilder, ServiceInitError};
use crate::error::Error;
use crate::transport::AuthenticatedChannel;

/// Typed service client constructible from a shared transport.
pub trait ServiceStub<T>: Sized {
    /// Fully qualified gRPC service name, e.g. `zitadel.admin.v1.AdminService`.
    const SERVICE_NAME: &'static str;

    /// Builds the stub on `transport`; calls are addressed to `origin`.
    ///
    /// ## Errors
    ///
    /// Returns [`ServiceInitError::Construct`] if the stub cannot be built.
    fn from_transport(transport: T, origin: Uri) -> Result<Self, ServiceInitError>;
}

/// gRPC client bound to one service.
#[derive(Clone)]
pub struct ServiceClient<T> {
    inner: Grpc<T>,
    service: &'static str,
}

impl<T> ServiceClient<T> {
    /// Creates a client for `service` over `transport`.
    pub fn new(transport: T, origin: Uri, service: &'static str) -> Self {
        Self {
            inner: Grpc::with_origin(transport, origin),
            service,
        }
    }

    /// Fully qualified service name.
    pub fn service_name(&self) -> &'static str {
        self.service
    }
}

impl<T> ServiceClient<T>
where
    T: tonic::client::GrpcService<tonic::body::Body> + Clone,
    T::Error: Into<StdError>,
    T::ResponseBody: Body<Data = Bytes> + Send + 'static,
    <T::ResponseBody as Body>::Error: Into<StdError> + Send,
{
    /// Performs a unary call to `method` of this service.
    ///
    /// ## Errors
    ///
    /// Returns the call's [`Status`]. Credential failures surface as `UNAUTHENTICATED`.
    pub async fn unary<M1, M2>(
        &self,
        method: &'static str,
        request: impl IntoRequest<M1>,
    ) -> Result<Response<M2>, Status>
    where
        M1: prost::Message + Send + Sync + 'static,
        M2: prost::Message + Default + Send + Sync + 'static,
    {
        let (mut inner, path, req) = self.prepare(method, request).await?;
        let codec = tonic_prost::ProstCodec::<M1, M2>::default();
        inner.unary(req, path, codec).await
    }

    /// Performs a server-streaming call to `method` of this service.
    ///
    /// ## Errors
    ///
    /// Returns the call's [`Status`].
    pub async fn server_streaming<M1, M2>(
        &self,
        method: &'static str,
        request: impl IntoRequest<M1>,
    ) -> Result<Response<Streaming<M2>>, Status>
    where
        M1: prost::Message + Send + Sync + 'static,
        M2: prost::Message + Default + Send + Sync + 'static,
    {
        let (mut inner, path, req) = self.prepare(method, request).await?;
        let codec = tonic_prost::ProstCodec::<M1, M2>::default();
        inner.server_streaming(req, path, codec).await
    }

    async fn prepare<M1>(
        &self,
        method: &'static str,
        request: impl IntoRequest<M1>,
    ) -> Result<(Grpc<T>, PathAndQuery, tonic::Request<M1>), Status> {
        let mut inner = self.inner.clone();
        inner.ready().await.map_err(|e| {
            Status::unknown(format!("Service was not ready: {}", e.into()))
        })?;

        let path = PathAndQuery::try_from(format!("/{}/{method}", self.service))
            .map_err(|e| Status::internal(format!("invalid method path: {e}")))?;

        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new(self.service, method));
        Ok((inner, path, req))
    }
}

impl<T: fmt::Debug> fmt::Debug for ServiceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &self.service)
            .field("inner", &self.inner)
            .finish()
    }
}

macro_rules! service_clients {
    ($( $(#[$meta:meta])* $name:ident => $service:literal; )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name<T = AuthenticatedChannel> {
                inner: ServiceClient<T>,
            }

            impl<T> ServiceStub<T> for $name<T> {
                const SERVICE_NAME: &'static str = $service;

                fn from_transport(transport: T, origin: Uri) -> Result<Self, ServiceInitError> {
                    Ok(Self {
                        inner: ServiceClient::new(transport, origin, $service),
                    })
                }
            }

            impl<T> Deref for $name<T> {
                type Target = ServiceClient<T>;

                fn deref(&self) -> &ServiceClient<T> {
                    &self.inner
                }
            }

            impl $name {
                /// Connects a standalone client for this service only.
                ///
                /// ## Errors
                ///
                /// Same as [`ClientBuilder::build`].
                pub async fn connect(builder: ClientBuilder) -> Result<Self, Error> {
                    let (transport, origin) = builder.connect_transport().await?;
                    Ok(<Self as ServiceStub<AuthenticatedChannel>>::from_transport(
                        transport, origin,
                    )?)
                }
            }
        )*
    };
}

service_clients! {
    /// Client for `zitadel.system.v1.SystemService`.
    SystemServiceClient => "zitadel.system.v1.SystemService";
    /// Client for `zitadel.admin.v1.AdminService`.
    AdminServiceClient => "zitadel.admin.v1.AdminService";
    /// Client for `zitadel.management.v1.ManagementService`.
    ManagementServiceClient => "zitadel.management.v1.ManagementService";
    /// Client for `zitadel.auth.v1.AuthService`.
    AuthServiceClient => "zitadel.auth.v1.AuthService";
    /// Client for `zitadel.user.v2beta.UserService`.
    UserServiceV2BetaClient => "zitadel.user.v2beta.UserService";
    /// Client for `zitadel.user.v2.UserService`.
    UserServiceV2Client => "zitadel.user.v2.UserService";
    /// Client for `zitadel.settings.v2beta.SettingsService`.
    SettingsServiceV2BetaClient => "zitadel.settings.v2beta.SettingsService";
    /// Client for `zitadel.settings.v2.SettingsService`.
    SettingsServiceV2Client => "zitadel.settings.v2.SettingsService";
    /// Client for `zitadel.session.v2beta.SessionService`.
    SessionServiceV2BetaClient => "zitadel.session.v2beta.SessionService";
    /// Client for `zitadel.session.v2.SessionService`.
    SessionServiceV2Client => "zitadel.session.v2.SessionService";
    /// Client for `zitadel.org.v2beta.OrganizationService`.
    OrganizationServiceV2BetaClient => "zitadel.org.v2beta.OrganizationService";
    /// Client for `zitadel.org.v2.OrganizationService`.
    OrganizationServiceV2Client => "zitadel.org.v2.OrganizationService";
    /// Client for `zitadel.oidc.v2beta.OIDCService`.
    OidcServiceV2BetaClient => "zitadel.oidc.v2beta.OIDCService";
    /// Client for `zitadel.oidc.v2.OIDCService`.
    OidcServiceV2Client => "zitadel.oidc.v2.OIDCService";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stubs_carry_service_names() {
        let origin = Uri::from_static("https://id.example.com");
        let admin = AdminServiceClient::<()>::from_transport((), origin.clone()).unwrap();
        assert_eq!(admin.service_name(), "zitadel.admin.v1.AdminService");

        let oidc = OidcServiceV2Client::<()>::from_transport((), origin).unwrap();
        assert_eq!(oidc.service_name(), "zitadel.oidc.v2.OIDCService");
        assert_eq!(
            <OidcServiceV2Client<()> as ServiceStub<()>>::SERVICE_NAME,
            "zitadel.oidc.v2.OIDCService"
        );
    }
}
