use crate::RuleKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no input to parse")]
    MissingInput,

    #[error("{kind:?} entry {entry:?} is empty once normalized")]
    InvalidEntry { kind: RuleKind, entry: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serialization")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
