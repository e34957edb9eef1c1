//! # Logic Gates
//!
//! A run is judged by one [`Gate`] applied to the two probe fingerprints.
//! The gate only ever sees three booleans:
//!
//! * `a`: probe 1 produced a response,
//! * `b`: probe 2 produced a response,
//! * `match`: both responses exist and their digests are equal.
//!
//! Absence never matches absence, so `XNOR` over two failed probes is `false`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::digest::Digest;

/// The boolean predicate selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    /// Unary: only the first probe is launched and consulted.
    Not,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gate '{0}' (expected one of AND, OR, XOR, NAND, NOR, XNOR, NOT)")]
pub struct GateParseError(pub String);

impl Gate {
    pub const ALL: [Gate; 7] = [
        Gate::And,
        Gate::Or,
        Gate::Xor,
        Gate::Nand,
        Gate::Nor,
        Gate::Xnor,
        Gate::Not,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Gate::And => "AND",
            Gate::Or => "OR",
            Gate::Xor => "XOR",
            Gate::Nand => "NAND",
            Gate::Nor => "NOR",
            Gate::Xnor => "XNOR",
            Gate::Not => "NOT",
        }
    }

    /// Unary gates launch a single probe.
    pub fn is_unary(self) -> bool {
        matches!(self, Gate::Not)
    }

    /// The whole truth table.
    pub fn decide(self, signals: GateSignals) -> bool {
        let GateSignals { a, b, matched } = signals;
        match self {
            Gate::And => a && b && matched,
            Gate::Or => a || b,
            Gate::Xor => a != b,
            Gate::Nand => !(a && b && matched),
            Gate::Nor => !(a || b),
            Gate::Xnor => (a == b) && matched,
            Gate::Not => !a,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gate {
    type Err = GateParseError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Gate::ALL
            .into_iter()
            .find(|gate| gate.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GateParseError(s.to_string()))
    }
}

/// Presence and equality facts derived from two optional digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateSignals {
    pub a: bool,
    pub b: bool,
    pub matched: bool,
}

impl GateSignals {
    pub fn from_digests(digest1: Option<&Digest>, digest2: Option<&Digest>) -> Self {
        let matched = match (digest1, digest2) {
            (Some(d1), Some(d2)) => d1 == d2,
            _ => false,
        };
        Self {
            a: digest1.is_some(),
            b: digest2.is_some(),
            matched,
        }
    }
}

/// The two fingerprints handed to the evaluator.
///
/// For [`Gate::Not`] the second slot is always `None`: the second probe is
/// never started.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GateInput {
    pub digest1: Option<Digest>,
    pub digest2: Option<Digest>,
}

impl GateInput {
    pub fn new(digest1: Option<Digest>, digest2: Option<Digest>) -> Self {
        Self { digest1, digest2 }
    }

    pub fn signals(&self) -> GateSignals {
        GateSignals::from_digests(self.digest1.as_ref(), self.digest2.as_ref())
    }

    pub fn evaluate(&self, gate: Gate) -> bool {
        evaluate(gate, self.digest1.as_ref(), self.digest2.as_ref())
    }
}

/// Evaluates `gate` over two optional digests.
pub fn evaluate(gate: Gate, digest1: Option<&Digest>, digest2: Option<&Digest>) -> bool {
    gate.decide(GateSignals::from_digests(digest1, digest2))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
