mod classify;
mod normalize;
mod original;
mod validate;

use hkmeta_core::Metadata;
use serde_json::Value;

use crate::cli::Command;
use crate::error::CliError;
use crate::input;

pub fn run(command: &Command) -> Result<Value, CliError> {
    match command {
        Command::Validate(args) => validate::run(&input::read(args)?),
        Command::Normalize(args) => normalize::run(&input::read(args)?),
        Command::Classify(args) => classify::run(&input::read(args)?),
        Command::Original(args) => original::run(&input::read(args)?),
    }
}

fn decode_metadata(input: &str) -> Result<Metadata, CliError> {
    Ok(Metadata::from_json(input)?)
}
