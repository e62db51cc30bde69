use hkmeta_core::{AnyValue, Metadata, UntypedMap};
use serde_json::Value;

use crate::error::CliError;

/// JSON carries no instant type, so date-like strings classify as `string`.
pub fn run(input: &str) -> Result<Value, CliError> {
    let Value::Object(entries) = serde_json::from_str::<Value>(input)? else {
        return Err(CliError::Input(String::from(
            "expected a JSON object of key/value pairs",
        )));
    };

    let untyped: UntypedMap = entries
        .into_iter()
        .map(|(key, value)| (key, AnyValue::from(value)))
        .collect();
    let metadata = Metadata::make_from(&untyped)?;
    Ok(serde_json::to_value(metadata)?)
}
