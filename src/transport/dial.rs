//! Caller-supplied connection options.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tonic::transport::Endpoint;

use crate::transport::TransportError;

/// Custom endpoint transformation, applied in order with the other options.
pub type EndpointMutator = Arc<dyn Fn(Endpoint) -> Endpoint + Send + Sync>;

/// Connection option passed through to the transport.
///
/// Options are applied in the order given; when the same setting appears twice the later
/// value wins. Socket-level options ([`ConnectTimeout`](Self::ConnectTimeout),
/// [`TcpNodelay`](Self::TcpNodelay), [`TcpKeepalive`](Self::TcpKeepalive)) are honored by
/// the connector itself, everything else configures the tonic [`Endpoint`].
#[derive(Clone)]
#[non_exhaustive]
pub enum DialOption {
    /// Per-request timeout applied by the channel.
    Timeout(Duration),
    /// Bound on DNS resolution, TCP connect and TLS handshake.
    ConnectTimeout(Duration),
    /// Enables or disables `SO_KEEPALIVE` on the socket.
    TcpKeepalive(bool),
    /// Enables or disables `TCP_NODELAY` (enabled by default).
    TcpNodelay(bool),
    /// Interval between HTTP/2 keepalive pings.
    Http2KeepaliveInterval(Duration),
    /// Time to wait for a keepalive ping acknowledgement.
    KeepaliveTimeout(Duration),
    /// Whether keepalive pings are sent while no stream is open.
    KeepaliveWhileIdle(bool),
    /// Prefix for the `user-agent` header.
    UserAgent(String),
    /// Maximum number of in-flight requests on the channel.
    ConcurrencyLimit(usize),
    /// Defers connecting until the first RPC instead of connecting while building.
    Lazy,
    /// Arbitrary [`Endpoint`] transformation.
    Custom(EndpointMutator),
}

impl DialOption {
    /// Wraps an arbitrary [`Endpoint`] transformation.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Endpoint) -> Endpoint + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub(crate) fn apply(&self, endpoint: Endpoint) -> Result<Endpoint, TransportError> {
        let endpoint = match self {
            Self::Timeout(d) => endpoint.timeout(*d),
            Self::Http2KeepaliveInterval(d) => endpoint.http2_keep_alive_interval(*d),
            Self::KeepaliveTimeout(d) => endpoint.keep_alive_timeout(*d),
            Self::KeepaliveWhileIdle(enabled) => endpoint.keep_alive_while_idle(*enabled),
            Self::UserAgent(agent) => endpoint
                .user_agent(agent.as_str())
                .map_err(|_| TransportError::InvalidDialOption(format!("user agent {agent:?}")))?,
            Self::ConcurrencyLimit(limit) => endpoint.concurrency_limit(*limit),
            Self::Custom(f) => f(endpoint),
            Self::ConnectTimeout(_) | Self::TcpKeepalive(_) | Self::TcpNodelay(_) | Self::Lazy => {
                endpoint
            }
        };
        Ok(endpoint)
    }
}

impl fmt::Debug for DialOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(d) => f.debug_tuple("Timeout").field(d).finish(),
            Self::ConnectTimeout(d) => f.debug_tuple("ConnectTimeout").field(d).finish(),
            Self::TcpKeepalive(v) => f.debug_tuple("TcpKeepalive").field(v).finish(),
            Self::TcpNodelay(v) => f.debug_tuple("TcpNodelay").field(v).finish(),
            Self::Http2KeepaliveInterval(d) => {
                f.debug_tuple("Http2KeepaliveInterval").field(d).finish()
            }
            Self::KeepaliveTimeout(d) => f.debug_tuple("KeepaliveTimeout").field(d).finish(),
            Self::KeepaliveWhileIdle(v) => f.debug_tuple("KeepaliveWhileIdle").field(v).finish(),
            Self::UserAgent(v) => f.debug_tuple("UserAgent").field(v).finish(),
            Self::ConcurrencyLimit(v) => f.debug_tuple("ConcurrencyLimit").field(v).finish(),
            Self::Lazy => f.write_str("Lazy"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Socket settings folded from the dial options; applied by the connector.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SocketSettings {
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) nodelay: bool,
    pub(crate) keepalive: bool,
    pub(crate) lazy: bool,
}

impl Default for SocketSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            nodelay: true,
            keepalive: false,
            lazy: false,
        }
    }
}

impl SocketSettings {
    pub(crate) fn from_options(options: &[DialOption]) -> Self {
        options
            .iter()
            .fold(Self::default(), |mut settings, option| {
                match option {
                    DialOption::ConnectTimeout(d) => settings.connect_timeout = Some(*d),
                    DialOption::TcpNodelay(v) => settings.nodelay = *v,
                    DialOption::TcpKeepalive(v) => settings.keepalive = *v,
                    DialOption::Lazy => settings.lazy = true,
                    _ => {}
                }
                settings
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_socket_options_win() {
        let settings = SocketSettings::from_options(&[
            DialOption::TcpNodelay(false),
            DialOption::ConnectTimeout(Duration::from_secs(1)),
            DialOption::TcpNodelay(true),
            DialOption::ConnectTimeout(Duration::from_secs(5)),
        ]);
        assert!(settings.nodelay);
        assert_eq!(settings.connect_timeout, Some(Duration::from_secs(5)));
        assert!(!settings.lazy);
    }

    #[test]
    fn defaults() {
        let settings = SocketSettings::from_options(&[]);
        assert!(settings.nodelay);
        assert!(!settings.keepalive);
        assert!(settings.connect_timeout.is_none());
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let endpoint = Endpoint::from_static("http://localhost:8080");
        let err = DialOption::UserAgent("bad\nagent".into())
            .apply(endpoint)
            .unwrap_err();
        assert!(matches!(err, TransportError::InvalidDialOption(_)));
    }

    #[test]
    fn custom_option_runs() {
        let endpoint = Endpoint::from_static("http://localhost:8080");
        let option = DialOption::custom(|e| e.timeout(Duration::from_secs(3)));
        assert!(option.apply(endpoint).is_ok());
        assert_eq!(format!("{option:?}"), "Custom(..)");
    }
}
