mod cli;
mod commands;
mod error;
mod input;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let data = commands::run(&cli.command)?;
    output::render(&data, cli.pretty)?;

    Ok(())
}
