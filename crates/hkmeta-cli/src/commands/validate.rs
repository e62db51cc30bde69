use std::collections::BTreeMap;

use hkmeta_core::ValueType;
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

use super::decode_metadata;

#[derive(Debug, Serialize)]
struct ValidateResponseData {
    valid: bool,
    entries: usize,
    types: BTreeMap<String, ValueType>,
}

pub fn run(input: &str) -> Result<Value, CliError> {
    let metadata = decode_metadata(input)?;
    let types = metadata
        .iter()
        .map(|(key, value)| (key.clone(), value.value_type()))
        .collect();

    let data = ValidateResponseData {
        valid: true,
        entries: metadata.len(),
        types,
    };
    Ok(serde_json::to_value(data)?)
}
