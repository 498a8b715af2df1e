//! `boilts` command-line entry point.

use boilts::cli::{self, Cli};
use boilts::logging::{LoggingConfig, init_logging};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&LoggingConfig::from_verbosity(cli.verbose)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let stdout = std::io::stdout();
    if let Err(e) = cli::run(&cli, &mut stdout.lock()) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
