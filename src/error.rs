//! Error types for albumstore

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("album already exists at {id}")]
    Duplicate { id: String },

    #[error("no album IDs left to assign")]
    IdsExhausted,

    #[error("album not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound(id.into())
    }
}
