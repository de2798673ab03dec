mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing goes to stderr so stdout stays clean for command output.
    // Per-character weight mappings show up with RUST_LOG=debug.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Command::Count { n } => commands::cmd_count(n, cli.json),
        Command::Encode { password } => commands::cmd_encode(password.as_deref(), cli.json),
        Command::Recover {
            z,
            strategy,
            min_len,
            max_len,
            limit,
        } => commands::cmd_recover(&z, strategy.into(), min_len, max_len, limit, cli.json),
        Command::Table => commands::cmd_table(cli.json),
    }
}
