//! gRPC channel connector for ZITADEL instances.
//!
//! The channel always targets `http://host:port`; TLS is layered on by the connector
//! (rustls over the raw TCP stream) and the request origin is rewritten to `https` so the
//! `:scheme` pseudo-header and the credential policy agree with the real transport.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper_util::rt::TokioIo;
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tokio_rustls::TlsConnector;
use tonic::transport::{Channel, Endpoint as TonicEndpoint, Uri};
use tower::service_fn;

use crate::credentials::{CredentialsService, PerRpcCredentials};
use crate::issuer::Issuer;
use crate::prelude::{debug, info};
use crate::transport::dial::SocketSettings;
use crate::transport::{tls, DialOption, TransportError};

/// Channel with the per-RPC credential layer installed.
pub type AuthenticatedChannel = CredentialsService<Channel>;

/// Connects to `issuer` and installs `credentials` on the resulting channel.
///
/// Transport security follows the issuer: plaintext when TLS is disabled (the skip-verify
/// flag is then ignored), TLS without certificate validation when skip-verify is set, and
/// TLS validated against the OS trust store otherwise. `options` are applied in order.
///
/// Unless [`DialOption::Lazy`] is given the connection is established before returning.
///
/// ## Errors
///
/// Returns [`TransportError`] if the TLS configuration cannot be built, an option is
/// invalid, or the connection attempt fails.
pub async fn connect(
    issuer: &Issuer,
    credentials: PerRpcCredentials,
    options: &[DialOption],
) -> Result<AuthenticatedChannel, TransportError> {
    let settings = SocketSettings::from_options(options);

    let mut endpoint = TonicEndpoint::from_shared(format!("http://{}", issuer.host()))?;
    if issuer.is_tls() {
        endpoint = endpoint.origin(origin(issuer)?);
    }
    for option in options {
        endpoint = option.apply(endpoint)?;
    }

    info!(
        "connecting to {} (tls: {}, skip verify: {}, lazy: {})",
        issuer.host(),
        issuer.is_tls(),
        issuer.is_tls() && issuer.is_insecure_skip_verify_tls(),
        settings.lazy
    );

    let channel = if issuer.is_tls() {
        connect_tls(issuer, endpoint, settings).await?
    } else {
        connect_plain(issuer, endpoint, settings).await?
    };

    Ok(CredentialsService::new(channel, Arc::new(credentials)))
}

/// Request origin (`scheme://authority`) for calls to `issuer`.
///
/// ## Errors
///
/// Returns [`TransportError::InvalidUri`] if the issuer does not form a valid URI.
pub fn origin(issuer: &Issuer) -> Result<Uri, TransportError> {
    Ok(Uri::try_from(issuer.origin())?)
}

async fn connect_plain(
    issuer: &Issuer,
    endpoint: TonicEndpoint,
    settings: SocketSettings,
) -> Result<Channel, TransportError> {
    let host = Arc::new(issuer.host());

    let connector = service_fn(move |_: Uri| {
        let host = Arc::clone(&host);
        async move {
            let stream = open_tcp(&host, settings).await?;
            Ok::<_, io::Error>(TokioIo::new(stream))
        }
    });

    if settings.lazy {
        return Ok(endpoint.connect_with_connector_lazy(connector));
    }
    Ok(endpoint.connect_with_connector(connector).await?)
}

async fn connect_tls(
    issuer: &Issuer,
    endpoint: TonicEndpoint,
    settings: SocketSettings,
) -> Result<Channel, TransportError> {
    let config = tls::client_config(issuer.is_insecure_skip_verify_tls())?;
    let tls = TlsConnector::from(config);
    let server_name = tls::server_name(issuer.domain())?;
    let host = Arc::new(issuer.host());

    let connector = service_fn(move |_: Uri| {
        let host = Arc::clone(&host);
        let tls = tls.clone();
        let server_name = server_name.clone();
        async move {
            let tcp = open_tcp(&host, settings).await?;
            let handshake = tls.connect(server_name, tcp);
            let stream = match settings.connect_timeout {
                Some(limit) => tokio::time::timeout(limit, handshake)
                    .await
                    .map_err(|_| timed_out(&host))??,
                None => handshake.await?,
            };
            Ok::<_, io::Error>(TokioIo::new(stream))
        }
    });

    if settings.lazy {
        return Ok(endpoint.connect_with_connector_lazy(connector));
    }
    Ok(endpoint.connect_with_connector(connector).await?)
}

async fn open_tcp(host: &str, settings: SocketSettings) -> io::Result<TcpStream> {
    let attempt = async {
        let mut last_err = None;
        for addr in lookup_host(host).await? {
            match open_socket(addr, settings).await {
                Ok(stream) => {
                    debug!("connected to {addr}");
                    return Ok(stream);
                }
                Err(err) => {
                    debug!("connection to {addr} failed: {err}");
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{host} did not resolve to any address"),
            )
        }))
    };

    match settings.connect_timeout {
        Some(limit) => tokio::time::timeout(limit, attempt)
            .await
            .map_err(|_| timed_out(host))?,
        None => attempt.await,
    }
}

async fn open_socket(addr: SocketAddr, settings: SocketSettings) -> io::Result<TcpStream> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_keepalive(settings.keepalive)?;
    let stream = socket.connect(addr).await?;
    stream.set_nodelay(settings.nodelay)?;
    Ok(stream)
}

fn timed_out(host: &str) -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, format!("connecting to {host} timed out"))
}
