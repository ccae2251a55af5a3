//! JSON-file store: one document per catalog entry.
//!
//! The whole entry is read on open and rewritten after every mutation. The
//! async mutex is held across the write so concurrent calls (such as the
//! per-leaf calls of a bulk reassignment) land on disk in call order.

use crate::contract::{OverrideRecord, OverrideStore, RevisionStore};
use crate::error::StoreResult;
use crate::record::EntryRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;
use vellum_model::{LeafAddress, LivePointers, Payload, Revision, RevisionId, TrackKind};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    record: Mutex<EntryRecord>,
}

impl JsonFileStore {
    /// Open an entry file, starting empty when it does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let record = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => EntryRecord::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), "opened entry file");
        Ok(Self {
            path,
            record: Mutex::new(record),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Publish a revision as live, as the owning server would
    pub async fn set_live(&self, kind: TrackKind, id: Option<RevisionId>) -> StoreResult<()> {
        let mut record = self.record.lock().await;
        record.set_live(kind, id)?;
        self.persist(&record).await
    }

    pub async fn snapshot(&self) -> EntryRecord {
        self.record.lock().await.clone()
    }

    async fn persist(&self, record: &EntryRecord) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl RevisionStore for JsonFileStore {
    async fn list_revisions(&self, kind: TrackKind) -> StoreResult<Vec<Revision<Payload>>> {
        Ok(self.record.lock().await.revisions(kind))
    }

    async fn live_pointers(&self) -> StoreResult<LivePointers> {
        Ok(self.record.lock().await.live.clone())
    }

    async fn create_revision(
        &self,
        kind: TrackKind,
        payload: Payload,
    ) -> StoreResult<Revision<Payload>> {
        let mut record = self.record.lock().await;
        let id = RevisionId::new(Uuid::new_v4().to_string());
        let revision = record.append(kind, id, payload)?;
        self.persist(&record).await?;

        tracing::info!(%kind, id = %revision.id, seq = revision.seq, "created revision");
        Ok(revision)
    }

    async fn delete_revision(&self, kind: TrackKind, id: &RevisionId) -> StoreResult<()> {
        let mut record = self.record.lock().await;
        record.remove(kind, id)?;
        self.persist(&record).await
    }
}

#[async_trait]
impl OverrideStore for JsonFileStore {
    async fn list_overrides(&self) -> StoreResult<Vec<OverrideRecord>> {
        Ok(self.record.lock().await.overrides.clone())
    }

    async fn set_override(&self, leaf: &LeafAddress, revision_id: &RevisionId) -> StoreResult<()> {
        let mut record = self.record.lock().await;
        record.set_override(leaf, revision_id)?;
        self.persist(&record).await
    }

    async fn clear_override(&self, leaf: &LeafAddress) -> StoreResult<()> {
        let mut record = self.record.lock().await;
        record.clear_override(leaf);
        self.persist(&record).await
    }

    async fn clear_all_overrides(&self) -> StoreResult<()> {
        let mut record = self.record.lock().await;
        record.clear_overrides();
        self.persist(&record).await
    }
}
