use dnacompare_engine::EngineError;

/// Failure turning a delimited file into an `ObservationSet`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("line {line}: {message}")]
    Csv { line: u64, message: String },

    #[error("missing column '{column}' (found: {found})")]
    MissingColumn { column: String, found: String },

    #[error("line {line}, column '{column}': cannot parse number '{value}'")]
    InvalidNumber { line: u64, column: String, value: String },

    #[error(transparent)]
    Validation(#[from] EngineError),
}

impl LoadError {
    /// True when the file could not be read at all (as opposed to read but
    /// malformed).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(String),
}
