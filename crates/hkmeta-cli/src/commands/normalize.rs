use serde_json::Value;

use crate::error::CliError;

use super::decode_metadata;

pub fn run(input: &str) -> Result<Value, CliError> {
    let metadata = decode_metadata(input)?;
    Ok(serde_json::to_value(metadata)?)
}
