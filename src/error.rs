//! Error types for the vocabulary engine.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("{0}")]
    Validation(String),

    #[error("Word not found: {0}")]
    NotFound(String),

    #[error("Failed to write vocabulary file {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode vocabulary: {0}")]
    Encode(#[from] serde_json::Error),
}

impl VocabError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, VocabError>;
