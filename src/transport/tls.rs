//! rustls client configuration for TLS issuers.

use std::sync::{Arc, OnceLock};

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};

use crate::prelude::{debug, warn};
use crate::transport::TransportError;

const ALPN_H2: &[u8] = b"h2";

static NATIVE_ROOTS: OnceLock<Arc<RootCertStore>> = OnceLock::new();

/// Builds the client TLS configuration.
///
/// With `skip_verify` the server certificate chain is accepted without validation; handshake
/// signatures are still checked so the session keys belong to whoever presented the chain.
pub(crate) fn client_config(skip_verify: bool) -> Result<Arc<ClientConfig>, TransportError> {
    let provider = crypto_provider();
    let builder = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()?;

    let mut config = if skip_verify {
        warn!("TLS certificate verification is disabled for the ZITADEL connection");
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoServerVerification { provider }))
            .with_no_client_auth()
    } else {
        builder
            .with_root_certificates(native_roots()?)
            .with_no_client_auth()
    };

    // gRPC requires HTTP/2.
    config.alpn_protocols = vec![ALPN_H2.to_vec()];
    Ok(Arc::new(config))
}

pub(crate) fn server_name(domain: &str) -> Result<ServerName<'static>, TransportError> {
    ServerName::try_from(domain.to_owned())
        .map_err(|_| TransportError::InvalidServerName(domain.to_owned()))
}

fn crypto_provider() -> Arc<CryptoProvider> {
    CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::ring::default_provider()))
}

fn native_roots() -> Result<Arc<RootCertStore>, TransportError> {
    if let Some(roots) = NATIVE_ROOTS.get() {
        return Ok(Arc::clone(roots));
    }

    let loaded = rustls_native_certs::load_native_certs();
    for err in &loaded.errors {
        warn!("error loading native root certificate: {err}");
    }

    let mut roots = RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(loaded.certs);
    debug!("loaded {added} native root certificates ({ignored} ignored)");
    if roots.is_empty() {
        return Err(TransportError::NoRootCertificates);
    }

    Ok(Arc::clone(NATIVE_ROOTS.get_or_init(|| Arc::new(roots))))
}

#[derive(Debug)]
struct NoServerVerification {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for NoServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::{client_config, server_name};
    use crate::transport::TransportError;

    #[test]
    fn skip_verify_config_offers_h2() {
        let config = client_config(true).unwrap();
        assert_eq!(config.alpn_protocols, vec![b"h2".to_vec()]);
    }

    #[test]
    fn server_name_accepts_dns_and_ip() {
        assert!(server_name("id.example.com").is_ok());
        assert!(server_name("127.0.0.1").is_ok());
    }

    #[test]
    fn server_name_rejects_garbage() {
        let err = server_name("not a host!").unwrap_err();
        assert!(matches!(err, TransportError::InvalidServerName(_)));
    }
}
