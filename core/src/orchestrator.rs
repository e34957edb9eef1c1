//! # Probe Orchestrator
//!
//! Launches the run's probes concurrently and waits for **all** of them to
//! reach a terminal state before anything looks at the results. A probe
//! that fails instantly does not cut the other one short; each probe is
//! only bounded by its own timeouts.
//!
//! For unary gates the second slot is never started and stays `None`.

use tracing::{Instrument, info_span};

use tunnelgate_common::config::RunConfig;
use tunnelgate_common::gate::GateInput;
use tunnelgate_common::probe::{Probe, ProbeResult};
use tunnelgate_common::{error, success};

use crate::connector::Connector;

/// Joined results of one run, with the digests already computed.
#[derive(Debug)]
pub struct ProbeReport {
    pub first: ProbeResult,
    pub second: Option<ProbeResult>,
    pub input: GateInput,
}

impl ProbeReport {
    pub fn new(first: ProbeResult, second: Option<ProbeResult>) -> Self {
        let input = GateInput::new(first.digest(), second.as_ref().and_then(ProbeResult::digest));
        Self {
            first,
            second,
            input,
        }
    }

    /// Probe 1's response if it has one, otherwise probe 2's.
    pub fn into_preferred_response(self) -> Option<Vec<u8>> {
        self.first
            .into_response()
            .or_else(|| self.second.and_then(ProbeResult::into_response))
    }
}

pub struct ProbeOrchestrator<C> {
    connector: C,
}

impl<C: Connector> ProbeOrchestrator<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub async fn run(&self, config: &RunConfig) -> ProbeReport {
        let (first, second) = config.probes();
        let request = config.request.as_slice();

        let (first, second) = match second {
            Some(second) => {
                let (r1, r2) = tokio::join!(
                    self.launch(&first, request),
                    self.launch(&second, request)
                );
                (r1, Some(r2))
            }
            None => (self.launch(&first, request).await, None),
        };

        ProbeReport::new(first, second)
    }

    async fn launch(&self, probe: &Probe, request: &[u8]) -> ProbeResult {
        let span = info_span!("probe", label = %probe.label, interface = %probe.interface);
        let result = self
            .connector
            .connect(probe, request)
            .instrument(span)
            .await;

        match &result.outcome {
            Ok(body) => success!(
                "[{}] {} bytes received via {}",
                result.label,
                body.len(),
                result.interface
            ),
            Err(e) => error!(
                "[{}] failed at {} via {}: {e}",
                result.label,
                e.stage(),
                result.interface
            ),
        }

        result
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
