use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpellError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("word bank not found: {0}")]
    WordBankMissing(String),

    #[error("cannot start a session without words")]
    EmptySession,
}

pub type Result<T> = std::result::Result<T, SpellError>;
