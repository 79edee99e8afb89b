//! Dotseal - encrypt secrets inside .env files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dotseal::cli::output;
use dotseal::cli::{execute, hint_for, Cli};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("DOTSEAL_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("dotseal=debug")
        } else {
            EnvFilter::new("dotseal=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        output::error(&e.to_string());
        if let Some(hint) = hint_for(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
