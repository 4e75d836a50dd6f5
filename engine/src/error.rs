use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV writing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Spreadsheet error: {source}")]
    XlsxError {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Export error: {0}")]
    ExportError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Export problems are shown to the user and the session keeps going.
    pub fn is_export_failure(&self) -> bool {
        matches!(
            self,
            EngineError::ExportError(_)
                | EngineError::CsvSystemError { .. }
                | EngineError::IoError { .. }
                | EngineError::JsonError { .. }
                | EngineError::XlsxError { .. }
        )
    }
}
