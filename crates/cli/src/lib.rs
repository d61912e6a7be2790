pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "shopscout",
    about = "Shopscout operator CLI",
    long_about = "Chat with the shopping assistant, run deterministic rankings, seed demo data, and inspect configuration.",
    after_help = "Examples:\n  shopscout chat\n  shopscout rank --item flour --item eggs --mode price\n  shopscout seed --force\n  shopscout config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Interactive chat session against a running shopscout-server")]
    Chat {
        #[arg(long, default_value = "http://127.0.0.1:5001", help = "Server base URL")]
        server: String,
    },
    #[command(about = "One-shot deterministic ranking against the local catalog (no server)")]
    Rank {
        #[arg(long = "item", required = true, help = "Item to include in the basket (repeatable)")]
        items: Vec<String>,
        #[arg(long, default_value = "balanced", help = "Preference mode: price|quality|balanced")]
        mode: String,
        #[arg(long, help = "Catalog file to rank against (overrides config)")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "Write the deterministic demo catalog to the configured path")]
    Seed {
        #[arg(long, help = "Overwrite an existing catalog file")]
        force: bool,
        #[arg(long, help = "Destination catalog file (overrides config)")]
        catalog: Option<PathBuf>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Chat { server } => commands::chat::run(server),
        Command::Rank { items, mode, catalog } => commands::rank::run(items, mode, catalog),
        Command::Seed { force, catalog } => commands::seed::run(force, catalog),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
