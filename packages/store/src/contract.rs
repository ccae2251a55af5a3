use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vellum_model::{
    LeafAddress, LivePointers, Payload, Revision, RevisionId, SectionType, TrackKind,
};

/// Revision history and live pointers of one catalog entry
#[async_trait]
pub trait RevisionStore: Send + Sync {
    /// Revisions of one track, newest first
    async fn list_revisions(&self, kind: TrackKind) -> StoreResult<Vec<Revision<Payload>>>;

    async fn live_pointers(&self) -> StoreResult<LivePointers>;

    /// Append a revision; the store assigns id, sequence and timestamp
    async fn create_revision(
        &self,
        kind: TrackKind,
        payload: Payload,
    ) -> StoreResult<Revision<Payload>>;

    async fn delete_revision(&self, kind: TrackKind, id: &RevisionId) -> StoreResult<()>;
}

/// Per-leaf override sub-resource of the rich-content track
#[async_trait]
pub trait OverrideStore: Send + Sync {
    async fn list_overrides(&self) -> StoreResult<Vec<OverrideRecord>>;

    async fn set_override(&self, leaf: &LeafAddress, revision_id: &RevisionId) -> StoreResult<()>;

    async fn clear_override(&self, leaf: &LeafAddress) -> StoreResult<()>;

    async fn clear_all_overrides(&self) -> StoreResult<()>;
}

/// One stored override row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRecord {
    pub section_type: SectionType,
    pub module_position: usize,
    pub revision_id: RevisionId,
}

impl OverrideRecord {
    pub fn new(leaf: &LeafAddress, revision_id: &RevisionId) -> Self {
        Self {
            section_type: leaf.section_type.clone(),
            module_position: leaf.module_position,
            revision_id: revision_id.clone(),
        }
    }

    pub fn leaf(&self) -> LeafAddress {
        LeafAddress {
            section_type: self.section_type.clone(),
            module_position: self.module_position,
        }
    }
}
