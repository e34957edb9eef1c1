//! One-shot verification run: probe, evaluate, select.

use tunnelgate_common::config::RunConfig;
use tunnelgate_common::gate::{Gate, GateInput, GateSignals};
use tunnelgate_common::{info, warn};

use crate::connector::Connector;
use crate::orchestrator::{ProbeOrchestrator, ProbeReport};

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub gate: Gate,
    pub passed: bool,
    pub signals: GateSignals,
    pub input: GateInput,
    /// Only set when the gate passed and at least one probe answered.
    pub selected_response: Option<Vec<u8>>,
}

impl RunOutcome {
    pub fn from_report(gate: Gate, report: ProbeReport) -> Self {
        let input = report.input.clone();
        let signals = input.signals();
        let passed = gate.decide(signals);

        let selected_response = if passed {
            report.into_preferred_response()
        } else {
            None
        };

        Self {
            gate,
            passed,
            signals,
            input,
            selected_response,
        }
    }
}

pub struct RunController<C> {
    orchestrator: ProbeOrchestrator<C>,
}

impl<C: Connector> RunController<C> {
    pub fn new(connector: C) -> Self {
        Self {
            orchestrator: ProbeOrchestrator::new(connector),
        }
    }

    pub fn connector(&self) -> &C {
        self.orchestrator.connector()
    }

    pub async fn execute(&self, config: &RunConfig) -> RunOutcome {
        if config.shares_interface() {
            warn!(
                "Both probes use {}; the paths cannot be told apart",
                config.tunnel1
            );
        }
        info!(
            "Running {} over {} against {}",
            config.gate,
            match &config.tunnel2 {
                Some(second) => format!("{} and {second}", config.tunnel1),
                None => config.tunnel1.clone(),
            },
            config.target
        );

        let report = self.orchestrator.run(config).await;
        let outcome = RunOutcome::from_report(config.gate, report);

        let GateSignals { a, b, matched } = outcome.signals;
        info!(
            "{} evaluated with a={a} b={b} match={matched}: {}",
            outcome.gate,
            if outcome.passed { "passed" } else { "failed" }
        );

        outcome
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
