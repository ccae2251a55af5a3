//! Serializable state of one catalog entry, shared by both adapters.

use crate::contract::OverrideRecord;
use crate::error::{StoreError, StoreResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vellum_model::{LeafAddress, LivePointers, Payload, Revision, RevisionId, TrackKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(default)]
    pub tracks: BTreeMap<TrackKind, Vec<Revision<Payload>>>,

    #[serde(default)]
    pub live: LivePointers,

    #[serde(default)]
    pub overrides: Vec<OverrideRecord>,

    /// Highest sequence number ever assigned per track, deleted revisions included
    #[serde(default)]
    pub high_water: BTreeMap<TrackKind, u64>,
}

impl EntryRecord {
    /// Revisions of one track, newest first
    pub fn revisions(&self, kind: TrackKind) -> Vec<Revision<Payload>> {
        let mut revisions = self.tracks.get(&kind).cloned().unwrap_or_default();
        revisions.sort_by(|a, b| b.seq.cmp(&a.seq));
        revisions
    }

    pub fn contains(&self, kind: TrackKind, id: &RevisionId) -> bool {
        self.tracks
            .get(&kind)
            .map(|revisions| revisions.iter().any(|revision| &revision.id == id))
            .unwrap_or(false)
    }

    /// Sequence number the next revision of `kind` will get; never reused after a delete
    pub fn next_seq(&self, kind: TrackKind) -> u64 {
        let listed = self
            .tracks
            .get(&kind)
            .and_then(|revisions| revisions.iter().map(|revision| revision.seq).max())
            .unwrap_or(0);
        let assigned = self.high_water.get(&kind).copied().unwrap_or(0);
        listed.max(assigned) + 1
    }

    /// Append a revision under `id`, assigning the next sequence number
    pub fn append(
        &mut self,
        kind: TrackKind,
        id: RevisionId,
        payload: Payload,
    ) -> StoreResult<Revision<Payload>> {
        if payload.kind() != kind {
            return Err(StoreError::KindMismatch {
                expected: kind,
                found: payload.kind(),
            });
        }

        let revision = Revision {
            id,
            seq: self.next_seq(kind),
            created_at: Utc::now(),
            payload,
        };
        self.high_water.insert(kind, revision.seq);
        self.tracks.entry(kind).or_default().push(revision.clone());
        Ok(revision)
    }

    pub fn remove(&mut self, kind: TrackKind, id: &RevisionId) -> StoreResult<()> {
        let revisions = self
            .tracks
            .get_mut(&kind)
            .ok_or_else(|| StoreError::not_found(kind, id))?;
        let before = revisions.len();
        revisions.retain(|revision| &revision.id != id);

        if revisions.len() == before {
            return Err(StoreError::not_found(kind, id));
        }
        Ok(())
    }

    pub fn set_live(&mut self, kind: TrackKind, id: Option<RevisionId>) -> StoreResult<()> {
        if let Some(id) = &id {
            if !self.contains(kind, id) {
                return Err(StoreError::not_found(kind, id));
            }
        }
        self.live.set(kind, id);
        Ok(())
    }

    /// Insert or replace the override row for `leaf`
    pub fn set_override(
        &mut self,
        leaf: &LeafAddress,
        revision_id: &RevisionId,
    ) -> StoreResult<()> {
        if !self.contains(TrackKind::RichContent, revision_id) {
            return Err(StoreError::not_found(TrackKind::RichContent, revision_id));
        }

        let record = OverrideRecord::new(leaf, revision_id);
        match self
            .overrides
            .iter_mut()
            .find(|existing| existing.leaf() == *leaf)
        {
            Some(existing) => *existing = record,
            None => self.overrides.push(record),
        }
        Ok(())
    }

    pub fn clear_override(&mut self, leaf: &LeafAddress) {
        self.overrides.retain(|existing| existing.leaf() != *leaf);
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }
}
