//! Interface-pinned TCP connect.
//!
//! The socket is pinned to the device itself (`SO_BINDTODEVICE` on Linux,
//! `IP_BOUND_IF` on Apple platforms) and bound to an address owned by the
//! interface. Platforms without a device pin refuse to probe at all: a
//! missing or unsuitable interface is an error, never a silent fallback to
//! the default route.

use std::net::{IpAddr, SocketAddr};

use pnet::datalink::NetworkInterface;
use tokio::net::{TcpSocket, TcpStream};
use tracing::debug;

use tunnelgate_common::network::interface::{AddressFamily, InterfaceError};
use tunnelgate_common::network::target::Target;
use tunnelgate_common::probe::{ProbeError, ProbeStage};
use tunnelgate_common::utils::interface::TunnelInterfaceExtension;

/// Resolves `target` and connects to it through `interface`.
pub async fn connect_bound(
    interface: &NetworkInterface,
    target: &Target,
) -> Result<TcpStream, ProbeError> {
    let resolved: Vec<SocketAddr> = tokio::net::lookup_host((target.host.as_str(), target.port))
        .await
        .map_err(|e| ProbeError::io(ProbeStage::Resolve, e))?
        .collect();

    let (remote, source) = pick_route(interface, &resolved)?;
    debug!(
        "{} resolved to {remote}, binding {source} on {}",
        target, interface.name
    );

    let socket = bind_socket(interface, source)?;
    socket
        .connect(remote)
        .await
        .map_err(|e| ProbeError::io(ProbeStage::Connect, e))
}

/// First resolved address the interface has a matching source address for.
fn pick_route(
    interface: &NetworkInterface,
    resolved: &[SocketAddr],
) -> Result<(SocketAddr, IpAddr), ProbeError> {
    if resolved.is_empty() {
        return Err(ProbeError::io(
            ProbeStage::Resolve,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved"),
        ));
    }

    resolved
        .iter()
        .find_map(|addr| interface.source_ip_for(addr.ip()).map(|src| (*addr, src)))
        .ok_or_else(|| {
            let target = resolved[0].ip();
            unavailable(
                interface,
                InterfaceError::NoCompatibleAddress {
                    family: AddressFamily::of(&target),
                    target,
                },
            )
        })
}

fn bind_socket(interface: &NetworkInterface, source: IpAddr) -> Result<TcpSocket, ProbeError> {
    let socket = match source {
        IpAddr::V4(_) => TcpSocket::new_v4(),
        IpAddr::V6(_) => TcpSocket::new_v6(),
    }
    .map_err(|e| ProbeError::io(ProbeStage::Connect, e))?;

    pin_to_device(&socket, interface, source)?;

    socket
        .bind(SocketAddr::new(source, 0))
        .map_err(|e| bind_failed(interface, e))?;

    Ok(socket)
}

/// `SO_BINDTODEVICE`.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "fuchsia"))]
fn pin_to_device(
    socket: &TcpSocket,
    interface: &NetworkInterface,
    _source: IpAddr,
) -> Result<(), ProbeError> {
    socket
        .bind_device(Some(interface.name.as_bytes()))
        .map_err(|e| bind_failed(interface, e))
}

/// `IP_BOUND_IF` / `IPV6_BOUND_IF`, keyed by interface index.
#[cfg(target_vendor = "apple")]
fn pin_to_device(
    socket: &TcpSocket,
    interface: &NetworkInterface,
    source: IpAddr,
) -> Result<(), ProbeError> {
    let index = device_index(interface)?;
    let sock = socket2::SockRef::from(socket);
    match source {
        IpAddr::V4(_) => sock.bind_device_by_index_v4(Some(index)),
        IpAddr::V6(_) => sock.bind_device_by_index_v6(Some(index)),
    }
    .map_err(|e| bind_failed(interface, e))
}

/// A source-address bind alone is only a routing hint, so refuse to probe.
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "fuchsia",
    target_vendor = "apple"
)))]
fn pin_to_device(
    _socket: &TcpSocket,
    interface: &NetworkInterface,
    _source: IpAddr,
) -> Result<(), ProbeError> {
    Err(unavailable(
        interface,
        InterfaceError::BindFailed("device pinning is not supported on this platform".to_string()),
    ))
}

#[cfg(any(target_vendor = "apple", test))]
fn device_index(interface: &NetworkInterface) -> Result<std::num::NonZeroU32, ProbeError> {
    std::num::NonZeroU32::new(interface.index).ok_or_else(|| {
        unavailable(
            interface,
            InterfaceError::BindFailed("interface has no index".to_string()),
        )
    })
}

fn bind_failed(interface: &NetworkInterface, e: std::io::Error) -> ProbeError {
    unavailable(interface, InterfaceError::BindFailed(e.to_string()))
}

fn unavailable(interface: &NetworkInterface, reason: InterfaceError) -> ProbeError {
    ProbeError::InterfaceUnavailable {
        interface: interface.name.clone(),
        reason,
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
