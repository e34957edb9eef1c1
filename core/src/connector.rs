//! The **connector** seam.
//!
//! The orchestrator only knows the [`Connector`] trait, so probes can be
//! driven by the real interface-bound TLS client or by scripted stand-ins.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use tunnelgate_common::config::ProbeLimits;
use tunnelgate_common::network::interface;
use tunnelgate_common::probe::{Probe, ProbeError, ProbeResult, ProbeStage};

use crate::network::{tcp, tls::{self, TlsSettings}};

/// Performs a single request/response exchange for one probe.
///
/// Implementations never return errors across this boundary: every failure
/// is folded into the returned [`ProbeResult`]. There are no retries.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, probe: &Probe, request: &[u8]) -> ProbeResult;
}

/// TLS client whose egress is pinned to the probe's interface.
pub struct InterfaceBoundConnector {
    tls: TlsSettings,
    limits: ProbeLimits,
}

#[async_trait]
impl Connector for InterfaceBoundConnector {
    async fn connect(&self, probe: &Probe, request: &[u8]) -> ProbeResult {
        let outcome = self.exchange(probe, request).await;
        ProbeResult::new(probe, outcome)
    }
}

impl InterfaceBoundConnector {
    pub fn new(tls: TlsSettings, limits: ProbeLimits) -> Self {
        Self { tls, limits }
    }

    async fn exchange(&self, probe: &Probe, request: &[u8]) -> Result<Vec<u8>, ProbeError> {
        let iface = interface::lookup(&probe.interface).map_err(|reason| {
            ProbeError::InterfaceUnavailable {
                interface: probe.interface.clone(),
                reason,
            }
        })?;

        let limits = &self.limits;
        let tcp = bounded(
            ProbeStage::Connect,
            limits.connect_timeout,
            tcp::connect_bound(&iface, &probe.target),
        )
        .await?;
        debug!("[{}] TCP connected via {}", probe.label, iface.name);

        let mut stream = bounded(
            ProbeStage::Handshake,
            limits.connect_timeout,
            tls::handshake(&self.tls, &probe.target.host, tcp),
        )
        .await?;
        debug!("[{}] TLS established, sending request", probe.label);

        bounded(
            ProbeStage::Write,
            limits.write_timeout,
            tls::write_request(&mut stream, request),
        )
        .await?;

        bounded(
            ProbeStage::Read,
            limits.read_timeout,
            tls::read_response(&mut stream, limits.max_response),
        )
        .await
    }
}

/// Caps one phase at `limit`; running over is just another probe error.
async fn bounded<T, F>(stage: ProbeStage, limit: Duration, phase: F) -> Result<T, ProbeError>
where
    F: Future<Output = Result<T, ProbeError>>,
{
    timeout(limit, phase)
        .await
        .map_err(|_elapsed| ProbeError::Timeout { stage, limit })?
}
