//! # Edit Session
//!
//! Drives one catalog entry against a store.
//!
//! Every command is applied to the local [`EntryState`] first (optimistic),
//! then the store calls it implies are issued together and awaited. A failed
//! call is reported, never retried, and the local state is kept as is: the
//! operator sees their edit even if the store diverges.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vellum_model::{Payload, Revision, TrackKind};
use vellum_store::{EntryStore, StoreError, StoreResult};

use crate::commands::{Command, Dispatch, StoreCall};
use crate::errors::EditorResult;
use crate::state::EntryState;

/// A store call that did not succeed
#[derive(Debug)]
pub struct FailedCall {
    pub call: StoreCall,
    pub error: StoreError,
}

/// Outcome of one dispatched command
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Whether local state changed
    pub changed: bool,

    /// Number of store calls issued
    pub issued: usize,

    pub failures: Vec<FailedCall>,
}

impl DispatchReport {
    /// Every issued call succeeded
    pub fn is_persisted(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Single-operator editing session over one entry
pub struct EditSession<S: EntryStore> {
    store: Arc<S>,
    state: EntryState,
}

impl<S: EntryStore> EditSession<S> {
    /// Load every track, the live pointers and the stored overrides
    pub async fn load(store: Arc<S>) -> EditorResult<Self> {
        let mut state = EntryState::new();

        let live = store.live_pointers().await?;
        state.dispatch(Command::SetLivePointers { live })?;

        for kind in TrackKind::ALL {
            let revisions = store.list_revisions(kind).await?;
            state.replace_track(kind, revisions)?;
        }

        let rows = store.list_overrides().await?;
        let stale = state.load_overrides(rows.into_iter().map(|row| (row.leaf(), row.revision_id)));
        issue_all(store.as_ref(), stale).await;

        info!(
            revisions = state.rich_content().track().len(),
            overrides = state.overrides().len(),
            "loaded entry"
        );

        Ok(Self { store, state })
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn dispatch(&mut self, command: Command) -> EditorResult<DispatchReport> {
        let Dispatch { changed, calls } = self.state.dispatch(command)?;
        let issued = calls.len();
        let failures = issue_all(self.store.as_ref(), calls).await;

        debug!(issued, failed = failures.len(), "store calls settled");

        Ok(DispatchReport {
            changed,
            issued,
            failures,
        })
    }

    /// Append a revision through the store and show it at the top of its track
    pub async fn create_revision(&mut self, payload: Payload) -> EditorResult<Revision<Payload>> {
        let kind = payload.kind();
        let revision = self.store.create_revision(kind, payload).await?;
        self.state.insert_revision(revision.clone())?;

        info!(track = %kind, id = %revision.id, "created revision");
        Ok(revision)
    }

    /// Re-read one track; its navigator resets to 0
    pub async fn reload_track(&mut self, kind: TrackKind) -> EditorResult<()> {
        let revisions = self.store.list_revisions(kind).await?;
        self.state.replace_track(kind, revisions)?;
        info!(track = %kind, len = self.state.track_len(kind), "reloaded track");
        Ok(())
    }

    /// Pick up live pointer changes made on the server side.
    ///
    /// Stored overrides equal to the new live revision are cleared.
    pub async fn refresh_live(&mut self) -> EditorResult<DispatchReport> {
        let live = self.store.live_pointers().await?;
        self.dispatch(Command::SetLivePointers { live }).await
    }
}

/// Issue independent calls together and collect the ones that failed
async fn issue_all<S: EntryStore>(store: &S, calls: Vec<StoreCall>) -> Vec<FailedCall> {
    let results = join_all(calls.iter().map(|call| issue(store, call))).await;

    calls
        .into_iter()
        .zip(results)
        .filter_map(|(call, result)| {
            result.err().map(|error| {
                warn!(%call, %error, "store call failed");
                FailedCall { call, error }
            })
        })
        .collect()
}

async fn issue<S: EntryStore>(store: &S, call: &StoreCall) -> StoreResult<()> {
    match call {
        StoreCall::SetOverride { leaf, revision_id } => store.set_override(leaf, revision_id).await,
        StoreCall::ClearOverride { leaf } => store.clear_override(leaf).await,
        StoreCall::ClearAllOverrides => store.clear_all_overrides().await,
        StoreCall::DeleteRevision { track, revision_id } => {
            store.delete_revision(*track, revision_id).await
        }
    }
}
