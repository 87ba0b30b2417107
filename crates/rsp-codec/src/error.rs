use std::fmt;

/// Errors produced while reading or writing inventory documents.
#[derive(Debug)]
pub enum CodecError {
    /// Filesystem error, with the offending path in the message.
    Io(String),
    Json(String),
    Csv(String),
    /// File extension is neither `.json` nor `.csv`.
    UnsupportedFormat(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io(msg) => write!(f, "io error: {msg}"),
            CodecError::Json(msg) => write!(f, "json error: {msg}"),
            CodecError::Csv(msg) => write!(f, "csv error: {msg}"),
            CodecError::UnsupportedFormat(path) => {
                write!(f, "unsupported document format: '{path}' (expected .json or .csv)")
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Json(e.to_string())
    }
}

impl From<csv::Error> for CodecError {
    fn from(e: csv::Error) -> Self {
        CodecError::Csv(e.to_string())
    }
}
