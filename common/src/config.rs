use std::time::Duration;

use thiserror::Error;

use crate::gate::Gate;
use crate::network::target::Target;
use crate::probe::{Probe, TUNNEL1_LABEL, TUNNEL2_LABEL};
use crate::request;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RESPONSE: usize = 64 * 1024;

/// Terminal output settings.
pub struct Config {
    /// Hides the banner printed on start-up.
    pub no_banner: bool,
    /// `1` hides headers and decorations, `2` also hides per-probe digests.
    pub quiet: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("interface name for {0} cannot be empty")]
    EmptyInterface(&'static str),
    #[error("gate {gate} needs {needed} tunnel interface(s), found {found}")]
    NotEnoughTunnels { gate: Gate, needed: usize, found: usize },
    #[error("request path must start with '/', got '{0}'")]
    InvalidPath(String),
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Per-phase bounds enforced independently by each probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeLimits {
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub read_timeout: Duration,
    pub max_response: usize,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_IO_TIMEOUT,
            read_timeout: DEFAULT_IO_TIMEOUT,
            max_response: DEFAULT_MAX_RESPONSE,
        }
    }
}

impl ProbeLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroLimit("connect timeout"));
        }
        if self.write_timeout.is_zero() || self.read_timeout.is_zero() {
            return Err(ConfigError::ZeroLimit("io timeout"));
        }
        if self.max_response == 0 {
            return Err(ConfigError::ZeroLimit("max response size"));
        }
        Ok(())
    }
}

/// Everything one verification run needs. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub gate: Gate,
    pub tunnel1: String,
    /// Always `None` for unary gates.
    pub tunnel2: Option<String>,
    pub target: Target,
    pub request: Vec<u8>,
    pub limits: ProbeLimits,
}

impl RunConfig {
    pub fn new(
        gate: Gate,
        tunnel1: String,
        tunnel2: Option<String>,
        target: Target,
        path: &str,
        limits: ProbeLimits,
    ) -> Result<Self, ConfigError> {
        if tunnel1.trim().is_empty() {
            return Err(ConfigError::EmptyInterface(TUNNEL1_LABEL));
        }
        let tunnel2 = match (gate.is_unary(), tunnel2) {
            (true, _) => None,
            (false, Some(name)) if name.trim().is_empty() => {
                return Err(ConfigError::EmptyInterface(TUNNEL2_LABEL));
            }
            (false, Some(name)) => Some(name),
            (false, None) => {
                return Err(ConfigError::NotEnoughTunnels {
                    gate,
                    needed: 2,
                    found: 1,
                });
            }
        };
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidPath(path.to_string()));
        }
        limits.validate()?;

        let request = request::http_get(&target, path);
        Ok(Self {
            gate,
            tunnel1,
            tunnel2,
            target,
            request,
            limits,
        })
    }

    /// The probes this run launches: one for unary gates, two otherwise.
    pub fn probes(&self) -> (Probe, Option<Probe>) {
        let first = Probe::new(TUNNEL1_LABEL, &self.tunnel1, self.target.clone());
        let second = self
            .tunnel2
            .as_ref()
            .filter(|_| !self.gate.is_unary())
            .map(|name| Probe::new(TUNNEL2_LABEL, name, self.target.clone()));
        (first, second)
    }

    pub fn shares_interface(&self) -> bool {
        self.tunnel2.as_deref() == Some(self.tunnel1.as_str())
    }
}

/// Fills in missing tunnel names from `detected`, skipping names already taken.
pub fn resolve_tunnels(
    gate: Gate,
    tunnel1: Option<String>,
    tunnel2: Option<String>,
    detected: &[String],
) -> Result<(String, Option<String>), ConfigError> {
    let needed = if gate.is_unary() { 1 } else { 2 };
    let taken: Vec<String> = tunnel1.iter().chain(tunnel2.iter()).cloned().collect();
    let mut spare = detected.iter().filter(move |name| !taken.contains(*name));

    let not_enough = || ConfigError::NotEnoughTunnels {
        gate,
        needed,
        found: detected.len(),
    };

    let first = match tunnel1 {
        Some(name) => name,
        None => spare.next().cloned().ok_or_else(not_enough)?,
    };

    if gate.is_unary() {
        return Ok((first, None));
    }

    let second = match tunnel2 {
        Some(name) => name,
        None => spare
            .find(|name| **name != first)
            .cloned()
            .ok_or_else(not_enough)?,
    };

    Ok((first, Some(second)))
}
