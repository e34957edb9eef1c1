//! # Probes
//!
//! A [`Probe`] describes one connection attempt over one local interface. It
//! is consumed by a connector and turned into exactly one [`ProbeResult`],
//! which holds either the raw response bytes or a [`ProbeError`].
//!
//! Probe errors never abort a run. From the gate's point of view every
//! failure is the same thing: an absent response.

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::digest::{self, Digest};
use crate::network::interface::InterfaceError;
use crate::network::target::Target;

pub const TUNNEL1_LABEL: &str = "Tunnel1";
pub const TUNNEL2_LABEL: &str = "Tunnel2";

/// One connection attempt, pinned to `interface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub label: String,
    pub interface: String,
    pub target: Target,
}

impl Probe {
    pub fn new(label: impl Into<String>, interface: impl Into<String>, target: Target) -> Self {
        Self {
            label: label.into(),
            interface: interface.into(),
            target,
        }
    }
}

/// The phase a probe was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStage {
    Interface,
    Resolve,
    Connect,
    Handshake,
    Write,
    Read,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProbeStage::Interface => "interface",
            ProbeStage::Resolve => "resolve",
            ProbeStage::Connect => "connect",
            ProbeStage::Handshake => "handshake",
            ProbeStage::Write => "write",
            ProbeStage::Read => "read",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The named interface is missing or cannot carry the connection.
    #[error("interface '{interface}' unavailable: {reason}")]
    InterfaceUnavailable {
        interface: String,
        reason: InterfaceError,
    },
    #[error("TLS handshake failed: {0}")]
    HandshakeFailure(#[source] io::Error),
    #[error("{stage} failed: {source}")]
    IoFailure {
        stage: ProbeStage,
        #[source]
        source: io::Error,
    },
    #[error("{stage} timed out after {limit:?}")]
    Timeout { stage: ProbeStage, limit: Duration },
}

impl ProbeError {
    pub fn io(stage: ProbeStage, source: io::Error) -> Self {
        ProbeError::IoFailure { stage, source }
    }

    pub fn stage(&self) -> ProbeStage {
        match self {
            ProbeError::InterfaceUnavailable { .. } => ProbeStage::Interface,
            ProbeError::HandshakeFailure(_) => ProbeStage::Handshake,
            ProbeError::IoFailure { stage, .. } | ProbeError::Timeout { stage, .. } => *stage,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout { .. })
    }
}

/// Outcome of a single probe: response bytes or an error, never both.
#[derive(Debug)]
pub struct ProbeResult {
    pub label: String,
    pub interface: String,
    pub outcome: Result<Vec<u8>, ProbeError>,
}

impl ProbeResult {
    pub fn new(probe: &Probe, outcome: Result<Vec<u8>, ProbeError>) -> Self {
        Self {
            label: probe.label.clone(),
            interface: probe.interface.clone(),
            outcome,
        }
    }

    pub fn response(&self) -> Option<&[u8]> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.outcome.as_ref().err()
    }

    pub fn digest(&self) -> Option<Digest> {
        self.response().map(digest::fingerprint)
    }

    pub fn into_response(self) -> Option<Vec<u8>> {
        self.outcome.ok()
    }
}
