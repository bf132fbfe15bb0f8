//! Domain error types.

/// Top-level error type for sentrank.
#[derive(Debug, thiserror::Error)]
pub enum SentrankError {
    #[error("failed to read {path}: {reason}")]
    DataRead { path: String, reason: String },

    #[error("malformed record in {source_name}: {reason}")]
    MalformedRecord { source_name: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SentrankError {
    pub(crate) fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SentrankError::MalformedRecord {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

impl From<&SentrankError> for std::process::ExitCode {
    fn from(err: &SentrankError) -> Self {
        let code: u8 = match err {
            SentrankError::Io(_) => 1,
            SentrankError::ConfigParse { .. } | SentrankError::ConfigInvalid { .. } => 2,
            SentrankError::DataRead { .. } | SentrankError::MalformedRecord { .. } => 3,
            SentrankError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
