//! Real TLS exchanges over `lo` against a self-signed local server.

use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{RootCertStore, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use tunnelgate_common::config::{ProbeLimits, RunConfig};
use tunnelgate_common::gate::Gate;
use tunnelgate_common::network::interface::InterfaceError;
use tunnelgate_common::network::target::Target;
use tunnelgate_common::probe::{Probe, ProbeError, ProbeStage};
use tunnelgate_core::connector::{Connector, InterfaceBoundConnector};
use tunnelgate_core::network::tls::TlsSettings;
use tunnelgate_core::run::RunController;

const LOOPBACK: &str = "lo";
const BODY: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\n\r\n{ip:local}\n";

#[derive(Clone, Copy)]
enum Behaviour {
    Answer,
    Silent,
}

struct LocalServer {
    port: u16,
    cert: CertificateDer<'static>,
}

async fn spawn_server(behaviour: Behaviour) -> anyhow::Result<LocalServer> {
    let certified = rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string()])?;
    let cert = certified.cert.der().clone();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let server_config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(vec![cert.clone()], key)?;
    let acceptor = TlsAcceptor::from(Arc::new(server_config));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        loop {
            let Ok((tcp, _)) = listener.accept().await else {
                return;
            };
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let Ok(mut tls) = acceptor.accept(tcp).await else {
                    return;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 512];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match tls.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                match behaviour {
                    Behaviour::Answer => {
                        let _ = tls.write_all(BODY).await;
                        let _ = tls.shutdown().await;
                    }
                    Behaviour::Silent => tokio::time::sleep(Duration::from_secs(30)).await,
                }
            });
        }
    });

    Ok(LocalServer { port, cert })
}

fn settings_for(server: &LocalServer) -> anyhow::Result<TlsSettings> {
    let mut roots = RootCertStore::empty();
    roots.add(server.cert.clone())?;
    Ok(TlsSettings::with_roots(roots)?)
}

fn limits() -> ProbeLimits {
    ProbeLimits {
        connect_timeout: Duration::from_secs(5),
        write_timeout: Duration::from_secs(5),
        read_timeout: Duration::from_millis(300),
        max_response: 64 * 1024,
    }
}

fn local_target(server: &LocalServer) -> Target {
    Target::new("127.0.0.1", server.port)
}

#[tokio::test]
async fn probe_over_loopback_returns_server_bytes() -> anyhow::Result<()> {
    let server = spawn_server(Behaviour::Answer).await?;
    let connector = InterfaceBoundConnector::new(settings_for(&server)?, limits());

    let probe = Probe::new("Tunnel1", LOOPBACK, local_target(&server));
    let result = connector.connect(&probe, b"GET /ip HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n").await;

    assert_eq!(result.response(), Some(BODY));
    Ok(())
}

#[tokio::test]
async fn and_gate_passes_when_both_probes_share_loopback() -> anyhow::Result<()> {
    let server = spawn_server(Behaviour::Answer).await?;
    let connector = InterfaceBoundConnector::new(settings_for(&server)?, limits());
    let run_cfg = RunConfig::new(
        Gate::And,
        LOOPBACK.to_string(),
        Some(LOOPBACK.to_string()),
        local_target(&server),
        "/ip",
        limits(),
    )?;

    let outcome = RunController::new(connector).execute(&run_cfg).await;

    assert!(outcome.passed);
    assert_eq!(outcome.selected_response.as_deref(), Some(BODY));
    Ok(())
}

#[tokio::test]
async fn silent_server_times_out_at_read() -> anyhow::Result<()> {
    let server = spawn_server(Behaviour::Silent).await?;
    let connector = InterfaceBoundConnector::new(settings_for(&server)?, limits());

    let probe = Probe::new("Tunnel1", LOOPBACK, local_target(&server));
    let result = connector.connect(&probe, b"GET /ip HTTP/1.1\r\n\r\n").await;

    let err = result.error().expect("silent server must not produce a response");
    assert!(err.is_timeout());
    assert_eq!(err.stage(), ProbeStage::Read);
    Ok(())
}

#[tokio::test]
async fn untrusted_certificate_fails_handshake() -> anyhow::Result<()> {
    let server = spawn_server(Behaviour::Answer).await?;
    let other = spawn_server(Behaviour::Answer).await?;
    // trusts a different self-signed certificate
    let connector = InterfaceBoundConnector::new(settings_for(&other)?, limits());

    let probe = Probe::new("Tunnel1", LOOPBACK, local_target(&server));
    let result = connector.connect(&probe, b"GET /ip HTTP/1.1\r\n\r\n").await;

    assert!(matches!(result.error(), Some(ProbeError::HandshakeFailure(_))));
    Ok(())
}

#[tokio::test]
async fn unknown_interface_is_reported_before_dialling() -> anyhow::Result<()> {
    let server = spawn_server(Behaviour::Answer).await?;
    let connector = InterfaceBoundConnector::new(settings_for(&server)?, limits());

    let probe = Probe::new("Tunnel1", "tg-missing0", local_target(&server));
    let result = connector.connect(&probe, b"GET /ip HTTP/1.1\r\n\r\n").await;

    match result.error() {
        Some(ProbeError::InterfaceUnavailable { reason, .. }) => {
            assert_eq!(*reason, InterfaceError::NotFound)
        }
        other => panic!("expected an unavailable interface, got {other:?}"),
    }
    Ok(())
}
