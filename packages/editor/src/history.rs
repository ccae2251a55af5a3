//! # History Compactor
//!
//! Derives the per-leaf change history of the rich-content track.
//!
//! Document revisions are numbered per document; a module only gets a new
//! version when its own content changed. With the leaf signatures below
//! (newest first), three distinct states survive:
//!
//! ```text
//! position   0   1   2   3   4   5
//! signature  P   P   Q   Q   Q   R
//! entries    ^       ^           ^
//! version    3       2           1
//! ```
//!
//! Revisions that lack the addressed section or module are skipped without
//! breaking the current run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vellum_model::{LeafAddress, ModuleSignature, RevisionId, RichContent, Track};

/// One distinct content state of a leaf
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Newest revision carrying this state
    pub revision_id: RevisionId,
    /// Raw index of that revision in the track
    pub position: usize,
    pub seq: u64,
    pub created_at: DateTime<Utc>,
    /// Module version number, 1 for the oldest distinct state
    pub version: usize,
    /// Every revision collapsed into this entry, newest first
    pub covers: Vec<RevisionId>,
}

impl HistoryEntry {
    pub fn covers(&self, revision_id: &RevisionId) -> bool {
        self.covers.contains(revision_id)
    }
}

pub fn compact_history(track: &Track<RichContent>, leaf: &LeafAddress) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = Vec::new();
    let mut last: Option<ModuleSignature<'_>> = None;

    for (position, revision) in track.iter().enumerate() {
        let Some(module) = revision.payload.module_at(leaf) else {
            continue;
        };
        let signature = module.signature();

        if last.as_ref() == Some(&signature) {
            if let Some(entry) = entries.last_mut() {
                entry.covers.push(revision.id.clone());
            }
            continue;
        }

        entries.push(HistoryEntry {
            revision_id: revision.id.clone(),
            position,
            seq: revision.seq,
            created_at: revision.created_at,
            version: 0,
            covers: vec![revision.id.clone()],
        });
        last = Some(signature);
    }

    let total = entries.len();
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.version = total - i;
    }

    entries
}

/// Index of the entry holding `effective`, or 0 when none does
pub fn entry_index_for(history: &[HistoryEntry], effective: Option<&RevisionId>) -> usize {
    effective
        .and_then(|id| history.iter().position(|entry| entry.covers(id)))
        .unwrap_or(0)
}
