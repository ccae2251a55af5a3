//! Error types for the editor

use thiserror::Error;
use vellum_model::{ModelError, RevisionId, TrackKind};
use vellum_store::StoreError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Revision {id} is not in the {track} track")]
    UnknownRevision { track: TrackKind, id: RevisionId },

    #[error("Revisions of the {0} track cannot be deleted")]
    DeleteNotSupported(TrackKind),
}

impl EditorError {
    pub fn unknown_revision(track: TrackKind, id: &RevisionId) -> Self {
        EditorError::UnknownRevision {
            track,
            id: id.clone(),
        }
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
