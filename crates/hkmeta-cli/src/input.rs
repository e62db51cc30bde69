use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::InputArgs;
use crate::error::CliError;

pub fn read(args: &InputArgs) -> Result<String, CliError> {
    match args.file.as_deref() {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
