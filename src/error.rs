use std::io;

/// Failures at the crate's I/O edges. The typing core itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word corpus not found: {0}")]
    MissingCorpus(String),
    #[error("word corpus {0} has no words")]
    EmptyCorpus(String),
}

pub type Result<T> = std::result::Result<T, Error>;
