//! Error type shared by the core crate.

use std::path::PathBuf;

/// Errors raised while loading configuration or knowledge data, or while updating the
/// tracker or review queue.
///
/// The query resolver never returns one of these; it is total over its input.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("knowledge file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid knowledge base: {0}")]
    InvalidKnowledge(String),

    #[error("unknown certificate record: {0}")]
    UnknownCertificate(u32),

    #[error("unknown review request: {0}")]
    UnknownReview(u32),

    #[error("review request {0} has already been decided")]
    AlreadyReviewed(u32),
}

pub type Result<T> = std::result::Result<T, CoreError>;
