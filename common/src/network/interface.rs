//! Local interface lookup.
//!
//! A probe names its interface; the connector must fail rather than fall back
//! to the default route when that interface is missing or unusable.

use std::fmt;
use std::net::IpAddr;

use pnet::datalink::{self, NetworkInterface};
use thiserror::Error;

use crate::utils::interface::TunnelInterfaceExtension;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InterfaceError {
    #[error("no such interface")]
    NotFound,
    /// The interface is operationally down.
    #[error("interface is down")]
    IsDown,
    #[error("interface has no routable address")]
    NoAddress,
    /// The interface carries no address of the target's family.
    #[error("no {family} address to reach {target}")]
    NoCompatibleAddress { family: AddressFamily, target: IpAddr },
    /// The OS refused to pin the socket to the interface.
    #[error("cannot bind to interface: {0}")]
    BindFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// Looks up `name` in the current interface table.
pub fn lookup(name: &str) -> Result<NetworkInterface, InterfaceError> {
    find_viable(name, &datalink::interfaces())
}

/// Up interfaces with at least one address, in OS order.
pub fn list_active() -> Vec<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .filter(|i| i.is_up() && !i.ips.is_empty())
        .collect()
}

/// Names of tunnel-like interfaces that could carry a probe, in OS order.
pub fn detect_tunnels() -> Vec<String> {
    select_tunnels(&datalink::interfaces())
}

fn find_viable(name: &str, interfaces: &[NetworkInterface]) -> Result<NetworkInterface, InterfaceError> {
    let interface = interfaces
        .iter()
        .find(|i| i.name == name)
        .ok_or(InterfaceError::NotFound)?;

    if !interface.is_up() {
        return Err(InterfaceError::IsDown);
    }
    if interface.usable_ips().is_empty() {
        return Err(InterfaceError::NoAddress);
    }

    Ok(interface.clone())
}

fn select_tunnels(interfaces: &[NetworkInterface]) -> Vec<String> {
    interfaces
        .iter()
        .filter(|i| i.is_up() && !i.is_loopback() && i.is_tunnel_like())
        .filter(|i| !i.usable_ips().is_empty())
        .map(|i| i.name.clone())
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
