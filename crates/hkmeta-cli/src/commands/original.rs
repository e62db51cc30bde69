use serde_json::Value;

use crate::error::CliError;

use super::decode_metadata;

pub fn run(input: &str) -> Result<Value, CliError> {
    let metadata = decode_metadata(input)?;
    Ok(serde_json::to_value(metadata.original())?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn widens_entries_to_plain_values() {
        let input = json!({
            "i": {"type": "int", "value": 9},
            "t": {"type": "date", "value": "1970-01-01T00:01:40Z"},
        })
        .to_string();

        let data = run(&input).expect("must widen");
        assert_eq!(data, json!({"i": 9, "t": "1970-01-01T00:01:40Z"}));
    }

    #[test]
    fn empty_metadata_has_no_original() {
        assert_eq!(run("{}").expect("must widen"), Value::Null);
    }
}
