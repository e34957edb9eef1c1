//! TLS client plumbing on top of an already pinned TCP stream.

use std::io;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use tunnelgate_common::probe::{ProbeError, ProbeStage};

/// Shared client configuration. Cheap to clone.
#[derive(Clone)]
pub struct TlsSettings {
    client_config: Arc<ClientConfig>,
}

impl TlsSettings {
    /// Trusts the Mozilla root program bundled with `webpki-roots`.
    pub fn with_webpki_roots() -> Result<Self, rustls::Error> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        Self::with_roots(roots)
    }

    pub fn with_roots(roots: RootCertStore) -> Result<Self, rustls::Error> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let client_config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .with_root_certificates(roots)
            .with_no_client_auth();

        Ok(Self {
            client_config: Arc::new(client_config),
        })
    }

    pub fn connector(&self) -> TlsConnector {
        TlsConnector::from(self.client_config.clone())
    }
}

/// Runs the TLS handshake, using `host` for SNI and certificate checks.
pub async fn handshake(
    settings: &TlsSettings,
    host: &str,
    tcp: TcpStream,
) -> Result<TlsStream<TcpStream>, ProbeError> {
    let server_name = ServerName::try_from(host.to_owned())
        .map_err(|e| ProbeError::HandshakeFailure(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

    settings
        .connector()
        .connect(server_name, tcp)
        .await
        .map_err(ProbeError::HandshakeFailure)
}

/// Writes the request exactly once.
pub async fn write_request<S>(stream: &mut S, request: &[u8]) -> Result<(), ProbeError>
where
    S: AsyncWrite + Unpin,
{
    stream
        .write_all(request)
        .await
        .map_err(|e| ProbeError::io(ProbeStage::Write, e))?;
    stream
        .flush()
        .await
        .map_err(|e| ProbeError::io(ProbeStage::Write, e))
}

/// Reads until the peer closes or `max` bytes have arrived.
///
/// Peers that drop the connection without a TLS `close_notify` surface as
/// `UnexpectedEof`; once some bytes are in hand that is treated as EOF.
pub async fn read_response<S>(stream: &mut S, max: usize) -> Result<Vec<u8>, ProbeError>
where
    S: AsyncRead + Unpin,
{
    let mut body: Vec<u8> = Vec::new();
    let limit = u64::try_from(max).unwrap_or(u64::MAX);

    match stream.take(limit).read_to_end(&mut body).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !body.is_empty() => {}
        Err(e) => return Err(ProbeError::io(ProbeStage::Read, e)),
    }

    if body.is_empty() {
        return Err(ProbeError::io(
            ProbeStage::Read,
            io::Error::new(io::ErrorKind::UnexpectedEof, "peer closed without responding"),
        ));
    }

    Ok(body)
}
