mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, interfaces, verify};
use terminal::{logging, print};
use tunnelgate_common::config::Config;
use tunnelgate_common::error;

const EXIT_GATE_PASSED: u8 = 0;
const EXIT_GATE_FAILED: u8 = 1;
const EXIT_SETUP_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
    };

    print::banner(cfg.no_banner, cfg.quiet);

    let result: anyhow::Result<bool> = match commands.command {
        Commands::Verify(args) => {
            print::header("dual tunnel verification", cfg.quiet);
            verify::verify(args, &cfg).await
        }
        Commands::Interfaces => {
            print::header("local interfaces", cfg.quiet);
            interfaces::interfaces(&cfg);
            Ok(true)
        }
    };

    if let Err(e) = &result {
        error!("{e:#}");
    }
    ExitCode::from(exit_status(&result))
}

/// 0 when the gate passed, 1 when it failed, 2 when the run never got that far.
fn exit_status(result: &anyhow::Result<bool>) -> u8 {
    match result {
        Ok(true) => EXIT_GATE_PASSED,
        Ok(false) => EXIT_GATE_FAILED,
        Err(_) => EXIT_SETUP_ERROR,
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
