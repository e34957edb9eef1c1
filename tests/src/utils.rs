use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tunnelgate_common::config::{ProbeLimits, RunConfig};
use tunnelgate_common::gate::Gate;
use tunnelgate_common::network::interface::InterfaceError;
use tunnelgate_common::network::target::Target;
use tunnelgate_common::probe::{Probe, ProbeError, ProbeResult, ProbeStage};
use tunnelgate_core::connector::Connector;

pub const SAME_BODY: &[u8] = b"HTTP/1.1 200 OK\r\n\r\n{ip:1.2.3.4}";
pub const OTHER_BODY: &[u8] = b"HTTP/1.1 200 OK\r\n\r\n{ip:5.6.7.8}";

#[derive(Clone)]
pub enum Reply {
    Body(Vec<u8>),
    Fail(ProbeStage),
}

#[derive(Clone)]
pub struct Script {
    pub delay: Duration,
    pub reply: Reply,
}

impl Script {
    pub fn body(bytes: &[u8]) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Reply::Body(bytes.to_vec()),
        }
    }

    pub fn fail(stage: ProbeStage) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Reply::Fail(stage),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Answers each interface from a fixed script and records which ones were dialled.
pub struct ScriptedConnector {
    scripts: HashMap<String, Script>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedConnector {
    pub fn new(scripts: &[(&str, Script)]) -> Self {
        Self {
            scripts: scripts
                .iter()
                .map(|(name, script)| (name.to_string(), script.clone()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn called(&self) -> Vec<String> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self, probe: &Probe, _request: &[u8]) -> ProbeResult {
        self.calls.lock().unwrap().push(probe.interface.clone());

        let Some(script) = self.scripts.get(&probe.interface) else {
            let err = ProbeError::InterfaceUnavailable {
                interface: probe.interface.clone(),
                reason: InterfaceError::NotFound,
            };
            return ProbeResult::new(probe, Err(err));
        };

        tokio::time::sleep(script.delay).await;

        let outcome = match &script.reply {
            Reply::Body(bytes) => Ok(bytes.clone()),
            Reply::Fail(ProbeStage::Interface) => Err(ProbeError::InterfaceUnavailable {
                interface: probe.interface.clone(),
                reason: InterfaceError::IsDown,
            }),
            Reply::Fail(ProbeStage::Handshake) => Err(ProbeError::HandshakeFailure(
                std::io::ErrorKind::InvalidData.into(),
            )),
            Reply::Fail(stage) => Err(ProbeError::io(
                *stage,
                std::io::ErrorKind::ConnectionReset.into(),
            )),
        };
        ProbeResult::new(probe, outcome)
    }
}

pub fn run_config(gate: Gate) -> RunConfig {
    RunConfig::new(
        gate,
        "utun0".to_string(),
        Some("utun1".to_string()),
        Target::new("httpbin.org", 443),
        "/ip",
        ProbeLimits::default(),
    )
    .unwrap()
}
