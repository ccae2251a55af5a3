//! In-memory store with call recording and failure injection.

use crate::contract::{OverrideRecord, OverrideStore, RevisionStore};
use crate::error::{StoreError, StoreResult};
use crate::record::EntryRecord;
use async_trait::async_trait;
use parking_lot::Mutex;
use vellum_model::{LeafAddress, LivePointers, Payload, Revision, RevisionId, TrackKind};

/// A store call, as recorded by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    ListRevisions(TrackKind),
    LivePointers,
    CreateRevision(TrackKind),
    DeleteRevision(TrackKind, RevisionId),
    ListOverrides,
    SetOverride(LeafAddress, RevisionId),
    ClearOverride(LeafAddress),
    ClearAllOverrides,
}

/// Single-entry store kept in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<EntryRecord>,
    calls: Mutex<Vec<StoreOp>>,
    failures: Mutex<Vec<StoreOp>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: EntryRecord) -> Self {
        Self {
            record: Mutex::new(record),
            ..Self::default()
        }
    }

    /// Designate the live revision of a track, as the server would
    pub fn set_live(&self, kind: TrackKind, id: Option<RevisionId>) -> StoreResult<()> {
        self.record.lock().set_live(kind, id)
    }

    /// Make every future call equal to `op` fail with [`StoreError::Rejected`]
    pub fn fail_on(&self, op: StoreOp) {
        self.failures.lock().push(op);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    pub fn snapshot(&self) -> EntryRecord {
        self.record.lock().clone()
    }

    /// Calls received so far, in arrival order
    pub fn calls(&self) -> Vec<StoreOp> {
        self.calls.lock().clone()
    }

    fn record_call(&self, op: StoreOp) -> StoreResult<()> {
        let failing = self.failures.lock().contains(&op);
        self.calls.lock().push(op.clone());

        if failing {
            tracing::debug!(?op, "injected store failure");
            return Err(StoreError::Rejected(format!("injected failure for {:?}", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl RevisionStore for MemoryStore {
    async fn list_revisions(&self, kind: TrackKind) -> StoreResult<Vec<Revision<Payload>>> {
        self.record_call(StoreOp::ListRevisions(kind))?;
        Ok(self.record.lock().revisions(kind))
    }

    async fn live_pointers(&self) -> StoreResult<LivePointers> {
        self.record_call(StoreOp::LivePointers)?;
        Ok(self.record.lock().live.clone())
    }

    async fn create_revision(
        &self,
        kind: TrackKind,
        payload: Payload,
    ) -> StoreResult<Revision<Payload>> {
        self.record_call(StoreOp::CreateRevision(kind))?;
        let mut record = self.record.lock();
        let id = RevisionId::new(format!("rev-{}-{}", kind, record.next_seq(kind)));
        record.append(kind, id, payload)
    }

    async fn delete_revision(&self, kind: TrackKind, id: &RevisionId) -> StoreResult<()> {
        self.record_call(StoreOp::DeleteRevision(kind, id.clone()))?;
        self.record.lock().remove(kind, id)
    }
}

#[async_trait]
impl OverrideStore for MemoryStore {
    async fn list_overrides(&self) -> StoreResult<Vec<OverrideRecord>> {
        self.record_call(StoreOp::ListOverrides)?;
        Ok(self.record.lock().overrides.clone())
    }

    async fn set_override(&self, leaf: &LeafAddress, revision_id: &RevisionId) -> StoreResult<()> {
        self.record_call(StoreOp::SetOverride(leaf.clone(), revision_id.clone()))?;
        self.record.lock().set_override(leaf, revision_id)
    }

    async fn clear_override(&self, leaf: &LeafAddress) -> StoreResult<()> {
        self.record_call(StoreOp::ClearOverride(leaf.clone()))?;
        self.record.lock().clear_override(leaf);
        Ok(())
    }

    async fn clear_all_overrides(&self) -> StoreResult<()> {
        self.record_call(StoreOp::ClearAllOverrides)?;
        self.record.lock().clear_overrides();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_model::Heading;

    #[tokio::test]
    async fn test_create_then_list() {
        let store = MemoryStore::new();
        for text in ["one", "two"] {
            store
                .create_revision(
                    TrackKind::Heading,
                    Payload::Heading(Heading {
                        text: text.to_string(),
                    }),
                )
                .await
                .unwrap();
        }

        let revisions = store.list_revisions(TrackKind::Heading).await.unwrap();
        assert_eq!(revisions.len(), 2);
        assert_eq!(revisions[0].id.as_str(), "rev-heading-2");
        assert_eq!(revisions[1].id.as_str(), "rev-heading-1");
    }

    #[tokio::test]
    async fn test_deleted_id_is_never_handed_out_again() {
        let store = MemoryStore::new();
        let heading = |text: &str| {
            Payload::Heading(Heading {
                text: text.to_string(),
            })
        };

        store
            .create_revision(TrackKind::Heading, heading("a"))
            .await
            .unwrap();
        let deleted = store
            .create_revision(TrackKind::Heading, heading("b"))
            .await
            .unwrap();
        store.set_live(TrackKind::Heading, Some(deleted.id.clone())).unwrap();
        store
            .delete_revision(TrackKind::Heading, &deleted.id)
            .await
            .unwrap();

        let created = store
            .create_revision(TrackKind::Heading, heading("c"))
            .await
            .unwrap();
        assert!(created.seq > deleted.seq);
        assert_ne!(created.id, deleted.id);
        assert_eq!(created.id.as_str(), "rev-heading-3");

        // the stale live pointer does not silently target the new revision
        let live = store.live_pointers().await.unwrap();
        assert_ne!(live.get(TrackKind::Heading), Some(&created.id));
    }

    #[tokio::test]
    async fn test_injected_failure_is_recorded_and_rejected() {
        let store = MemoryStore::new();
        let leaf = LeafAddress::new("hero", 0);
        store.fail_on(StoreOp::ClearOverride(leaf.clone()));

        let err = store.clear_override(&leaf).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.calls(), vec![StoreOp::ClearOverride(leaf)]);
    }
}
