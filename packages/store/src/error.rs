use thiserror::Error;
use vellum_model::{ModelError, RevisionId, TrackKind};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Revision {id} not found in {kind} track")]
    NotFound { kind: TrackKind, id: RevisionId },

    #[error("Cannot store a {found} payload in the {expected} track")]
    KindMismatch { expected: TrackKind, found: TrackKind },

    #[error("Store rejected the call: {0}")]
    Rejected(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(kind: TrackKind, id: &RevisionId) -> Self {
        Self::NotFound {
            kind,
            id: id.clone(),
        }
    }
}
