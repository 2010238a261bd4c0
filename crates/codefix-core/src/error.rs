use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodefixError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Panel template error: {0}")]
    Template(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("No open {0} document to apply the fix")]
    DocumentUnavailable(String),

    #[error("Edit rejected by the editor host: {0}")]
    EditFailed(String),

    #[error("Service request failed: {0}")]
    Transport(String),

    #[error("Malformed service response: {0}")]
    MalformedResult(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodefixError>;
