use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::info_span;
use tracing::Instrument;

use crate::commands::VerifyArgs;
use crate::terminal::{colors, format, print};
use tunnelgate_common::config::{self, Config, ProbeLimits, RunConfig};
use tunnelgate_common::network::interface;
use tunnelgate_core::connector::InterfaceBoundConnector;
use tunnelgate_core::network::tls::TlsSettings;
use tunnelgate_core::run::{RunController, RunOutcome};

/// Runs one verification and reports whether the gate was satisfied.
pub async fn verify(args: VerifyArgs, cfg: &Config) -> anyhow::Result<bool> {
    let run_cfg: RunConfig = build_run_config(args)?;

    let tls = TlsSettings::with_webpki_roots().context("building TLS client configuration")?;
    let controller = RunController::new(InterfaceBoundConnector::new(tls, run_cfg.limits));

    let start_time: Instant = Instant::now();
    let span = info_span!("verification", gate = %run_cfg.gate);
    let outcome: RunOutcome = controller.execute(&run_cfg).instrument(span).await;

    verification_ends(&outcome, start_time.elapsed(), cfg)?;
    Ok(outcome.passed)
}

fn build_run_config(args: VerifyArgs) -> anyhow::Result<RunConfig> {
    let detected: Vec<String> = if args.tunnel1.is_none() || args.tunnel2.is_none() {
        interface::detect_tunnels()
    } else {
        Vec::new()
    };

    let (tunnel1, tunnel2) = config::resolve_tunnels(args.gate, args.tunnel1, args.tunnel2, &detected)?;

    let limits = ProbeLimits {
        connect_timeout: Duration::from_secs(args.connect_timeout),
        write_timeout: Duration::from_secs(args.io_timeout),
        read_timeout: Duration::from_secs(args.io_timeout),
        max_response: args.max_response,
    };

    let run_cfg = RunConfig::new(args.gate, tunnel1, tunnel2, args.target, &args.path, limits)?;
    Ok(run_cfg)
}

fn verification_ends(outcome: &RunOutcome, total_time: Duration, cfg: &Config) -> anyhow::Result<()> {
    if cfg.quiet < 2 {
        print::header("Fingerprints", cfg.quiet);
        print::aligned_line("Tunnel1", format::digest_value(outcome.input.digest1.as_ref()));
        if !outcome.gate.is_unary() {
            print::aligned_line("Tunnel2", format::digest_value(outcome.input.digest2.as_ref()));
        }
        print::aligned_line("Signals", format::signals_value(outcome.signals));
    }

    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&format!("{}", format::verdict(outcome.gate, outcome.passed)));
            print::centerln(&format!("{}", format!("finished in {elapsed}").color(colors::TEXT_DEFAULT)));
        }
        _ => print::print_status(format!("{} in {elapsed}", format::verdict(outcome.gate, outcome.passed))),
    }

    if let Some(body) = &outcome.selected_response {
        print::response_body(body).context("writing response to stdout")?;
    }
    Ok(())
}
