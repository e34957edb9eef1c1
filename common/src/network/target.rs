//! # Probe Target
//!
//! The remote TLS endpoint both probes talk to.
//!
//! Accepted forms:
//! * `host` (port defaults to 443),
//! * `host:port`,
//! * a bare IPv6 address (`2001:db8::1`),
//! * `[v6]:port`.

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_TLS_PORT: u16 = 443;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("target host cannot be empty")]
    EmptyHost,
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error("invalid bracketed address '{0}'")]
    InvalidBracket(String),
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Value for the HTTP `Host` header; the port is omitted when it is 443.
    pub fn host_header(&self) -> String {
        let host = match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(v6)) => format!("[{v6}]"),
            _ => self.host.clone(),
        };
        if self.port == DEFAULT_TLS_PORT {
            host
        } else {
            format!("{host}:{}", self.port)
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Target {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(rest) = s.strip_prefix('[') {
            return parse_bracketed(rest, s);
        }

        if s.parse::<Ipv6Addr>().is_ok() {
            return Ok(Target::new(s, DEFAULT_TLS_PORT));
        }

        let (host, port) = match s.rsplit_once(':') {
            Some((host, port_str)) => (host, parse_port(port_str)?),
            None => (s, DEFAULT_TLS_PORT),
        };

        if host.is_empty() {
            return Err(TargetParseError::EmptyHost);
        }

        Ok(Target::new(host, port))
    }
}

/// Parses the remainder of `[v6]` or `[v6]:port` after the opening bracket.
fn parse_bracketed(rest: &str, original: &str) -> Result<Target, TargetParseError> {
    let Some((addr, tail)) = rest.split_once(']') else {
        return Err(TargetParseError::InvalidBracket(original.to_string()));
    };

    let v6 = addr
        .parse::<Ipv6Addr>()
        .map_err(|_| TargetParseError::InvalidBracket(original.to_string()))?;

    let port = match tail {
        "" => DEFAULT_TLS_PORT,
        _ => match tail.strip_prefix(':') {
            Some(port_str) => parse_port(port_str)?,
            None => return Err(TargetParseError::InvalidBracket(original.to_string())),
        },
    };

    Ok(Target::new(v6.to_string(), port))
}

fn parse_port(port_str: &str) -> Result<u16, TargetParseError> {
    match port_str.parse::<u16>() {
        Ok(0) | Err(_) => Err(TargetParseError::InvalidPort(port_str.to_string())),
        Ok(port) => Ok(port),
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
