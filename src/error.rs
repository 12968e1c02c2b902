use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Scope not found: {0}")]
    ScopeNotFound(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid window: {0}")]
    WindowParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedRecord(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
