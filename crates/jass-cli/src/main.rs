use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::RngCore;

use jass_cli::config::TableConfig;
use jass_cli::logging::init_logging;
use jass_cli::runner::{run_local, run_remote, write_summary};
use jass_cli::seats::SeatSpec;
use jass_core::AppInfo;

/// Schieber Jass table with Monte-Carlo search players.
#[derive(Debug, Parser)]
#[command(name = "jass", author, version, about = "Play Jass against search bots")]
struct Cli {
    /// Path to a YAML table configuration.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a whole game at a local table.
    Local {
        /// Seat specifications, `s[:name[:iterations]]` or `r[:name[:host]]`.
        #[arg(num_args = 4, required = true, value_name = "SEAT")]
        seats: Vec<SeatSpec>,

        /// Master seed for dealing and every simulated seat.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Minimum milliseconds a simulated seat takes per card.
        #[arg(long, value_name = "MS")]
        pacing_ms: Option<u64>,

        /// Milliseconds to wait between tricks.
        #[arg(long, value_name = "MS")]
        trick_delay_ms: Option<u64>,

        /// Write a JSON summary of the game to this file.
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,
    },
    /// Serve a search bot to a table hosted elsewhere, for one game.
    Remote {
        #[arg(long, value_name = "COUNT")]
        iterations: Option<usize>,

        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },
}

fn log_startup(mode: &str) {
    tracing::info!(
        target: "jass_cli",
        version = AppInfo::version(),
        mode,
        "{} ({}) starting",
        AppInfo::name(),
        AppInfo::codename()
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::default(),
    };

    match cli.command {
        Command::Local {
            seats,
            seed,
            pacing_ms,
            trick_delay_ms,
            summary,
        } => {
            if let Some(pacing_ms) = pacing_ms {
                config.pacing_ms = pacing_ms;
            }
            if let Some(trick_delay_ms) = trick_delay_ms {
                config.trick_delay_ms = trick_delay_ms;
            }
            config.validate()?;
            let _logging_guard = init_logging(&config.logging)?;
            log_startup("local");

            let seats: [SeatSpec; 4] = seats
                .try_into()
                .map_err(|_| anyhow::anyhow!("exactly four seats are required"))?;
            let seed = seed.unwrap_or_else(|| rand::thread_rng().next_u64());
            let game = run_local(&seats, &config, seed, &mut std::io::stdout())?;
            if let Some(path) = summary {
                write_summary(&game, &path)?;
                println!("Summary: {}", path.display());
            }
        }
        Command::Remote {
            iterations,
            seed,
            port,
        } => {
            if let Some(iterations) = iterations {
                config.iterations = iterations;
            }
            if let Some(port) = port {
                config.port = port;
            }
            config.validate().context("invalid remote options")?;
            let _logging_guard = init_logging(&config.logging)?;
            log_startup("remote");

            let seed = seed.unwrap_or_else(|| rand::thread_rng().next_u64());
            run_remote(config.iterations, seed, config.port)?;
        }
    }

    Ok(())
}
