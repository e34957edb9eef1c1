use std::net::IpAddr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

/// Name prefixes used by common tunnel drivers (macOS utun, Linux tun/tap,
/// WireGuard, PPP, IPsec).
pub const TUNNEL_PREFIXES: &[&str] = &["utun", "tun", "tap", "wg", "ppp", "ipsec"];

pub trait TunnelInterfaceExtension {
    /// Addresses a socket can be bound to for outbound traffic.
    fn usable_ips(&self) -> Vec<IpAddr>;
    /// Picks a local address of the same family as `target`.
    fn source_ip_for(&self, target: IpAddr) -> Option<IpAddr>;
    fn is_tunnel_like(&self) -> bool;
}

impl TunnelInterfaceExtension for NetworkInterface {
    fn usable_ips(&self) -> Vec<IpAddr> {
        self.ips
            .iter()
            .filter_map(|net| match net {
                // Link-local addresses never route beyond the local segment.
                IpNetwork::V4(v4) if !v4.ip().is_unspecified() && !v4.ip().is_link_local() => {
                    Some(IpAddr::V4(v4.ip()))
                }
                IpNetwork::V6(v6)
                    if !v6.ip().is_unspecified() && !v6.ip().is_unicast_link_local() =>
                {
                    Some(IpAddr::V6(v6.ip()))
                }
                _ => None,
            })
            .collect()
    }

    fn source_ip_for(&self, target: IpAddr) -> Option<IpAddr> {
        self.usable_ips()
            .into_iter()
            .find(|ip| ip.is_ipv4() == target.is_ipv4())
    }

    fn is_tunnel_like(&self) -> bool {
        self.is_point_to_point()
            || TUNNEL_PREFIXES
                .iter()
                .any(|prefix| self.name.starts_with(prefix))
    }
}
