use crate::terminal::{colors, print};
use colored::*;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;
use std::net::Ipv6Addr;
use tunnelgate_common::utils::interface::TunnelInterfaceExtension;

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    let first_byte = ipv6_addr.octets()[0];
    if (0x20..=0x3F).contains(&first_byte) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

pub fn to_key_value_pair_net(ip_net: &[IpNetwork]) -> Vec<(String, ColoredString)> {
    ip_net
        .iter()
        .map(|ip_network| match ip_network {
            IpNetwork::V4(ipv4_network) => {
                let address: ColoredString = ipv4_network.ip().to_string().color(colors::IPV4_ADDR);
                let prefix: ColoredString =
                    ipv4_network.prefix().to_string().color(colors::IPV4_PREFIX);
                let result: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                ("IPv4".to_string(), result)
            }
            IpNetwork::V6(ipv6_network) => {
                let address: ColoredString = ipv6_network.ip().to_string().color(colors::IPV6_ADDR);
                let prefix: ColoredString =
                    ipv6_network.prefix().to_string().color(colors::IPV6_PREFIX);
                let value: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                let key = ipv6_to_type_str(&ipv6_network.ip());
                (key.to_string(), value)
            }
        })
        .collect()
}

pub fn print_interface(interface: &NetworkInterface, idx: usize) {
    print::tree_head(idx, &interface.name);
    let mut key_value_pair: Vec<(String, ColoredString)> = to_key_value_pair_net(&interface.ips);

    let kind: ColoredString = if interface.is_tunnel_like() {
        "tunnel".color(colors::ACCENT).bold()
    } else if interface.is_loopback() {
        "loopback".dimmed()
    } else {
        "other".normal()
    };
    key_value_pair.push(("Kind".to_string(), kind));

    print::key_value_tree(&key_value_pair);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_ipv6_addresses() {
        assert_eq!(ipv6_to_type_str(&"2001:db8::1".parse().unwrap()), "GUA");
        assert_eq!(ipv6_to_type_str(&"fd00::1".parse().unwrap()), "ULA");
        assert_eq!(ipv6_to_type_str(&"fe80::1".parse().unwrap()), "LLA");
        assert_eq!(ipv6_to_type_str(&"::1".parse().unwrap()), "IPv6");
    }
}
