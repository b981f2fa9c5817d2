//! Command-line front end for the task tracker.
//!
//! Usage:
//!
//! ```text
//! taskwell [--database <path>] [--today <YYYY-MM-DD>] [--json] [--verbose] <command>
//! ```
//!
//! The database defaults to `tasks.db` and may also be set through
//! `TASKWELL_DATABASE`; the `tasks` table is created on first use. `--today`
//! pins the date used by reconciliation and unchecking, which keeps scripted
//! runs reproducible.

mod cli;
mod commands;
mod render;

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use taskwell::task::adapters::{
    clock::FixedClock,
    sqlite::{SqliteConfig, SqliteTaskRepository},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use render::Format;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SqliteConfig::new(cli.database.as_str());
    let repository = Arc::new(SqliteTaskRepository::connect(&config).await?);
    let format = Format::from_json_flag(cli.json);

    let output = match cli.today {
        Some(today) => {
            let clock = Arc::new(FixedClock::on(today));
            commands::run(cli.command, format, repository, clock).await?
        }
        None => commands::run(cli.command, format, repository, Arc::new(DefaultClock)).await?,
    };

    writeln!(io::stdout().lock(), "{output}")?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("taskwell=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskwell=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
