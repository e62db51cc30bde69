use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Metadata(#[from] hkmeta_core::MetadataError),

    #[error("invalid metadata: {0}")]
    Decode(serde_json::Error),

    #[error("invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Metadata(_) | Self::Decode(_) => 2,
            Self::Input(_) | Self::Serialization(_) => 3,
            Self::Io(_) => 10,
        }
    }
}

impl From<hkmeta_core::CoreError> for CliError {
    fn from(error: hkmeta_core::CoreError) -> Self {
        match error {
            hkmeta_core::CoreError::Metadata(error) => Self::Metadata(error),
            hkmeta_core::CoreError::Decode(error) => Self::Decode(error),
            hkmeta_core::CoreError::Serialization(error) => Self::Serialization(error),
        }
    }
}
