//! Euphoria CLI entry point.

use clap::Parser;

use euphoria::cli::{handle_error, run, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        handle_error(&err, cli.json);
    }
}
