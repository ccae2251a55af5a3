//! Revisions and the newest-first tracks that hold them.

use crate::error::ModelResult;
use crate::payload::{Payload, TrackKind, TrackPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable revision identifier assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RevisionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RevisionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable snapshot of one track's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision<P> {
    pub id: RevisionId,
    /// Monotonic per track, assigned by the store
    pub seq: u64,
    pub created_at: DateTime<Utc>,
    pub payload: P,
}

impl Revision<Payload> {
    pub fn kind(&self) -> TrackKind {
        self.payload.kind()
    }

    pub fn into_typed<P: TrackPayload>(self) -> ModelResult<Revision<P>> {
        Ok(Revision {
            id: self.id,
            seq: self.seq,
            created_at: self.created_at,
            payload: P::from_payload(self.payload)?,
        })
    }
}

impl<P: TrackPayload> Revision<P> {
    pub fn into_any(self) -> Revision<Payload> {
        Revision {
            id: self.id,
            seq: self.seq,
            created_at: self.created_at,
            payload: self.payload.into_payload(),
        }
    }
}

/// Read-only revision history of one track, newest first (index 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Track<P> {
    revisions: Vec<Revision<P>>,
}

impl<P> Track<P> {
    /// Build a track, ordering revisions by descending sequence number
    pub fn new(mut revisions: Vec<Revision<P>>) -> Self {
        revisions.sort_by(|a, b| b.seq.cmp(&a.seq));
        Self { revisions }
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Revision<P>> {
        self.revisions.get(index)
    }

    pub fn newest(&self) -> Option<&Revision<P>> {
        self.revisions.first()
    }

    pub fn oldest(&self) -> Option<&Revision<P>> {
        self.revisions.last()
    }

    pub fn position_of(&self, id: &RevisionId) -> Option<usize> {
        self.revisions.iter().position(|revision| &revision.id == id)
    }

    pub fn find(&self, id: &RevisionId) -> Option<&Revision<P>> {
        self.revisions.iter().find(|revision| &revision.id == id)
    }

    pub fn contains(&self, id: &RevisionId) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Revision<P>> {
        self.revisions.iter()
    }

    pub fn revisions(&self) -> &[Revision<P>] {
        &self.revisions
    }
}

impl<P: Clone> Track<P> {
    /// Copy of this track without the given revision
    pub fn without(&self, id: &RevisionId) -> Self {
        Self {
            revisions: self
                .revisions
                .iter()
                .filter(|revision| &revision.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Copy of this track with one more revision, re-ordered by sequence
    pub fn with_revision(&self, revision: Revision<P>) -> Self {
        let mut revisions = self.revisions.clone();
        revisions.push(revision);
        Self::new(revisions)
    }
}

impl<P: TrackPayload> Track<P> {
    /// Convert a store listing, rejecting revisions of another kind
    pub fn from_store(revisions: Vec<Revision<Payload>>) -> ModelResult<Self> {
        let typed = revisions
            .into_iter()
            .map(Revision::into_typed)
            .collect::<ModelResult<Vec<_>>>()?;
        Ok(Self::new(typed))
    }
}

impl<P> Default for Track<P> {
    fn default() -> Self {
        Self {
            revisions: Vec::new(),
        }
    }
}
