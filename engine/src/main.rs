// Lucrometro command line entry point
use anyhow::Result;
use clap::Parser;
use engine::cli::{self, Cli};
use engine::config::SimulatorSettings;
use engine::Session;
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so the tables on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let settings = SimulatorSettings::load(args.config.as_deref())?;
    info!(version = %settings.version, "Loaded simulator settings");

    let mut session = Session::new(settings);
    let input = args.apply_to(*session.input());
    session.set_input(input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::print_simulation(&session, &mut out)?;

    if args.save {
        let count = session.save();
        writeln!(out, "Simulação salva ({} no histórico).", count)?;
    }

    if args.interactive {
        let stdin = io::stdin();
        cli::run_interactive(&mut session, stdin.lock(), &mut out, args.format)?;
    }

    if let Some(path) = args.export {
        if session.history().is_empty() {
            warn!("Export requested but no simulation was saved; writing header only");
        }
        cli::export_notice(&session, Some(path), args.format, &mut out)?;
    }

    info!(session_id = %session.id(), saved = session.history().len(), "Session finished");
    Ok(())
}
