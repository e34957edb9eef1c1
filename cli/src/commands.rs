pub mod interfaces;
pub mod verify;

use clap::{Args, Parser, Subcommand};
use tunnelgate_common::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_IO_TIMEOUT, DEFAULT_MAX_RESPONSE};
use tunnelgate_common::gate::Gate;
use tunnelgate_common::network::target::Target;
use tunnelgate_common::request::DEFAULT_PATH;

#[derive(Parser)]
#[command(name = "tunnelgate")]
#[command(about = "Checks that two tunnels reach the same endpoint over distinct paths.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Hide the start-up banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Reduce decorative output (-q hides headers, -qq also hides digests)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the target over both tunnels and apply the logic gate
    #[command(alias = "v")]
    Verify(VerifyArgs),
    /// List local interfaces and mark the ones that look like tunnels
    #[command(alias = "i")]
    Interfaces,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Logic gate: AND, OR, XOR, NAND, NOR, XNOR or NOT
    #[arg(short, long, env = "TUNNELGATE_GATE", default_value = "AND")]
    pub gate: Gate,

    /// Interface for the first probe (auto-detected when omitted)
    #[arg(long, env = "TUNNELGATE_TUNNEL1")]
    pub tunnel1: Option<String>,

    /// Interface for the second probe (ignored by NOT)
    #[arg(long, env = "TUNNELGATE_TUNNEL2")]
    pub tunnel2: Option<String>,

    /// TLS endpoint as host[:port]
    #[arg(short, long, env = "TUNNELGATE_TARGET", default_value = "httpbin.org:443")]
    pub target: Target,

    /// Request path
    #[arg(long, env = "TUNNELGATE_PATH", default_value = DEFAULT_PATH)]
    pub path: String,

    /// Seconds allowed for connect and TLS handshake, each
    #[arg(long, env = "TUNNELGATE_CONNECT_TIMEOUT", value_name = "SECS",
          default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    pub connect_timeout: u64,

    /// Seconds allowed for writing the request and for reading the response, each
    #[arg(long, env = "TUNNELGATE_IO_TIMEOUT", value_name = "SECS",
          default_value_t = DEFAULT_IO_TIMEOUT.as_secs())]
    pub io_timeout: u64,

    /// Maximum response bytes read per probe
    #[arg(long, env = "TUNNELGATE_MAX_RESPONSE", value_name = "BYTES",
          default_value_t = DEFAULT_MAX_RESPONSE)]
    pub max_response: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
