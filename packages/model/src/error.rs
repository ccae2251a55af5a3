use crate::payload::TrackKind;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Expected a {expected} payload, found {found}")]
    KindMismatch { expected: TrackKind, found: TrackKind },

    #[error("A bullet set holds at most {max} bullets, got {got}")]
    TooManyBullets { max: usize, got: usize },

    #[error("Unknown track kind: {0}")]
    UnknownTrackKind(String),

    #[error("Invalid leaf address: {0}")]
    InvalidLeafAddress(String),
}

impl ModelError {
    pub fn kind_mismatch(expected: TrackKind, found: TrackKind) -> Self {
        Self::KindMismatch { expected, found }
    }
}
