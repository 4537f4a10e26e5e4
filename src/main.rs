//! # ticket-loadgen
//!
//! Command-line entry point. Loads the TOML configuration, builds a
//! [`LoadDriver`] and runs one scenario or probe.
//!
//! ```bash
//! ticket-loadgen --config loadgen.toml --seed 7 consecutive --users 5 --repeat 3
//! ticket-loadgen interleave --users 5 --rounds 3
//! ticket-loadgen probe already-sold
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ticket_loadgen::probe::ProbeKind;
use ticket_loadgen::random::DiceSource;
use ticket_loadgen::runtime::{setup_tracing, LoadDriver};
use ticket_loadgen::Config;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "ticket-loadgen", version, about = "Virtual-user load driver for the train-ticket backend")]
struct Cli {
    /// Path to the TOML configuration
    #[arg(short, long, default_value = "loadgen.toml")]
    config: PathBuf,

    /// Seed for reproducible runs; entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Users run one after another, each to completion
    Consecutive {
        #[arg(long, default_value_t = 5)]
        users: usize,
        /// Submissions per user
        #[arg(long, default_value_t = 3)]
        repeat: u32,
    },
    /// Users prepared together, then submit once per round in lock-step
    Interleave {
        #[arg(long, default_value_t = 5)]
        users: usize,
        #[arg(long, default_value_t = 3)]
        rounds: u32,
    },
    /// One read-only request as the first configured user
    Probe {
        #[arg(value_enum)]
        kind: ProbeKind,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let dice = match cli.seed {
        Some(seed) => DiceSource::seeded(seed),
        None => DiceSource::Entropy,
    };
    let mut driver = LoadDriver::new(&config, dice).context("building HTTP client")?;

    match cli.command {
        Command::Consecutive { users, repeat } => {
            info!(users, repeat, "Starting consecutive run");
            let report = driver.run_consecutive(users, repeat).await?;
            println!("{report}");
        }
        Command::Interleave { users, rounds } => {
            info!(users, rounds, "Starting interleaved run");
            let report = driver.run_interleaved(users, rounds).await?;
            println!("{report}");
        }
        Command::Probe { kind } => {
            let data = driver.probe(kind).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["ticket-loadgen", "--seed", "7", "interleave", "--rounds", "2"]);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.config, PathBuf::from("loadgen.toml"));
        assert!(matches!(cli.command, Command::Interleave { users: 5, rounds: 2 }));

        let cli = Cli::parse_from(["ticket-loadgen", "probe", "left-tickets"]);
        assert!(matches!(cli.command, Command::Probe { kind: ProbeKind::LeftTickets }));
    }
}
