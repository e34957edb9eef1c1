use crate::terminal::colors;
use colored::*;
use tunnelgate_common::digest::Digest;
use tunnelgate_common::gate::{Gate, GateSignals};

pub fn digest_value(digest: Option<&Digest>) -> ColoredString {
    match digest {
        Some(digest) => digest.to_hex().color(colors::DIGEST),
        None => "nil".dimmed(),
    }
}

pub fn bool_value(value: bool) -> ColoredString {
    if value {
        "true".color(colors::PASS)
    } else {
        "false".color(colors::FAIL)
    }
}

pub fn signals_value(signals: GateSignals) -> String {
    format!(
        "a={} b={} match={}",
        bool_value(signals.a),
        bool_value(signals.b),
        bool_value(signals.matched)
    )
}

pub fn verdict(gate: Gate, passed: bool) -> ColoredString {
    if passed {
        format!("✅ {gate} condition passed").color(colors::PASS).bold()
    } else {
        format!("❌ {gate} condition failed").color(colors::FAIL).bold()
    }
}
