//! Roulette Table Assistant
//!
//! Thin CLI front end over the session engine: an interactive REPL for live
//! play and a one-shot simulator for replaying a recorded sequence.

use clap::{Parser, Subcommand};
use roulette_assistant::{CategoryKind, GameConfig, Session};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roulette-assistant")]
#[command(about = "Decision-support assistant for European/American roulette")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: enter spins as they land
    Play {
        /// Starting bankroll
        #[arg(long, default_value = "100")]
        bankroll: Decimal,
        /// Enabled categories (color, parity, height, dozen, column, cold, neighbors)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<CategoryKind>,
    },
    /// Replay a recorded result sequence and print JSON reports
    Simulate {
        /// Starting bankroll
        #[arg(long, default_value = "100")]
        bankroll: Decimal,
        /// Comma-separated spins in chronological order
        #[arg(long, value_delimiter = ',')]
        spins: Vec<String>,
        /// Comma-separated warm-up results, most recent first
        #[arg(long, value_delimiter = ',')]
        warmup: Vec<String>,
        /// Enabled categories
        #[arg(long, value_delimiter = ',')]
        categories: Vec<CategoryKind>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = if Path::new(&cli.config).exists() {
        GameConfig::load(&cli.config)?
    } else {
        GameConfig::default()
    };

    match cli.command {
        Commands::Play {
            bankroll,
            categories,
        } => play(config, bankroll, categories),
        Commands::Simulate {
            bankroll,
            spins,
            warmup,
            categories,
        } => simulate(config, bankroll, spins, warmup, categories),
    }
}

fn default_categories() -> Vec<CategoryKind> {
    vec![
        CategoryKind::Color,
        CategoryKind::Dozen,
        CategoryKind::Column,
        CategoryKind::ColdNumber,
    ]
}

fn play(config: GameConfig, bankroll: Decimal, categories: Vec<CategoryKind>) -> anyhow::Result<()> {
    let categories = if categories.is_empty() {
        default_categories()
    } else {
        categories
    };

    let mut session = Session::new(config)?;
    session.initialize(bankroll, &categories)?;
    println!("Session started with bankroll {bankroll:.2}");

    let warmup_len = session.config().warmup_spins;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if warmup_len > 0 {
        println!("Enter {warmup_len} warm-up results, most recent first, comma-separated:");
        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let results: Vec<String> = line?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            match session.warm_up(&results) {
                Ok(()) => break,
                Err(e) => println!("warm-up failed: {e}"),
            }
        }
    } else {
        session.warm_up(&[])?;
    }

    println!("Enter spins one per line ('stats' for a summary, 'quit' to exit):");
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let input = line?.trim().to_string();
        match input.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "stats" => {
                let stats = session.stats()?;
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            raw => match session.process_spin(raw) {
                Ok(report) => {
                    for message in &report.messages {
                        println!("{message}");
                    }
                    if report.messages.is_empty() {
                        println!("No signal, keep watching");
                    }
                    println!(
                        "Bankroll: {:.2} (P/L {:.2})",
                        report.bankroll, report.profit_loss
                    );
                }
                Err(e) => println!("error: {e}"),
            },
        }
    }

    let stats = session.stats()?;
    println!(
        "Final bankroll: {:.2} (P/L {:.2}) over {} spins",
        stats.bankroll, stats.profit_loss, stats.total_spins
    );
    Ok(())
}

fn simulate(
    mut config: GameConfig,
    bankroll: Decimal,
    spins: Vec<String>,
    warmup: Vec<String>,
    categories: Vec<CategoryKind>,
) -> anyhow::Result<()> {
    let categories = if categories.is_empty() {
        default_categories()
    } else {
        categories
    };
    // The warm-up block is whatever the caller supplied.
    config.warmup_spins = warmup.len();

    let mut session = Session::new(config)?;
    session.initialize(bankroll, &categories)?;
    session.warm_up(&warmup)?;

    for raw in &spins {
        let report = session.process_spin(raw)?;
        println!("{}", serde_json::to_string(&report)?);
    }

    let stats = session.stats()?;
    println!("{}", serde_json::to_string(&stats)?);
    Ok(())
}
