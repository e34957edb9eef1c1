use colored::*;
use pnet::datalink::NetworkInterface;

use crate::terminal::{colors, network_fmt, print};
use crate::tprint;
use tunnelgate_common::config::Config;
use tunnelgate_common::network::interface;
use tunnelgate_common::utils::interface::TunnelInterfaceExtension;
use tunnelgate_common::{success, warn};

pub fn interfaces(cfg: &Config) {
    let interfaces: Vec<NetworkInterface> = interface::list_active();

    for (idx, intf) in interfaces.iter().enumerate() {
        network_fmt::print_interface(intf, idx);
        if idx + 1 != interfaces.len() {
            tprint!();
        }
    }

    let tunnels: usize = interfaces.iter().filter(|i| i.is_tunnel_like()).count();
    if cfg.quiet == 0 {
        print::fat_separator();
    }
    match tunnels {
        0 => warn!("No tunnel interfaces found; pass --tunnel1/--tunnel2 explicitly"),
        n => success!(
            "{} found",
            format!("{n} tunnel-like interface(s)").color(colors::ACCENT).bold()
        ),
    }
}
