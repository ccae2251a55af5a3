//! # Commands
//!
//! Named operator actions accepted by [`EntryState::dispatch`], and the
//! store calls they imply.
//!
//! ## Command Semantics
//!
//! ### Navigation (`StepOlder`, `StepNewer`, `JumpToLive`)
//! - Moves one track's cursor; clamps at both ends
//! - Never touches the store
//!
//! ### Leaf navigation (`LeafStepOlder`, `LeafStepNewer`, `LeafJumpToLive`)
//! - Walks the compacted history of one rich-content leaf
//! - Re-points the leaf through the normalizing override assignment
//! - A clamped no-op issues nothing
//!
//! ### Overrides (`SetLeafOverride`, `ClearLeafOverride`, `ClearAllOverrides`,
//! `ApplyRevisionToAllLeaves`)
//! - Update the in-memory table first, then emit one call per touched leaf
//! - Bulk reassignment emits one call per leaf of the layout revision
//!
//! ### `SetLivePointers`
//! - Server-side refresh; drops override entries equal to the new live
//!   rich-content revision and emits one `ClearOverride` per dropped leaf
//!
//! [`EntryState::dispatch`]: crate::EntryState::dispatch

use serde::{Deserialize, Serialize};
use vellum_model::{LeafAddress, LivePointers, RevisionId, TrackKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    StepOlder { track: TrackKind },

    StepNewer { track: TrackKind },

    JumpToLive { track: TrackKind },

    LeafStepOlder { leaf: LeafAddress },

    LeafStepNewer { leaf: LeafAddress },

    /// Put one leaf back on the live module
    LeafJumpToLive { leaf: LeafAddress },

    SetLeafOverride {
        leaf: LeafAddress,
        revision_id: RevisionId,
    },

    /// Single-leaf reset
    ClearLeafOverride { leaf: LeafAddress },

    /// Whole-track reset
    ClearAllOverrides,

    ApplyRevisionToAllLeaves { revision_id: RevisionId },

    /// Delete a heading, bullet, image or video revision
    DeleteRevision {
        track: TrackKind,
        revision_id: RevisionId,
    },

    SetLivePointers { live: LivePointers },
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::StepOlder { .. } => "step-older",
            Command::StepNewer { .. } => "step-newer",
            Command::JumpToLive { .. } => "jump-to-live",
            Command::LeafStepOlder { .. } => "leaf-step-older",
            Command::LeafStepNewer { .. } => "leaf-step-newer",
            Command::LeafJumpToLive { .. } => "leaf-jump-to-live",
            Command::SetLeafOverride { .. } => "set-leaf-override",
            Command::ClearLeafOverride { .. } => "clear-leaf-override",
            Command::ClearAllOverrides => "clear-all-overrides",
            Command::ApplyRevisionToAllLeaves { .. } => "apply-revision-to-all-leaves",
            Command::DeleteRevision { .. } => "delete-revision",
            Command::SetLivePointers { .. } => "set-live-pointers",
        }
    }
}

/// A persistence call implied by a command, issued after the state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum StoreCall {
    SetOverride {
        leaf: LeafAddress,
        revision_id: RevisionId,
    },

    ClearOverride { leaf: LeafAddress },

    ClearAllOverrides,

    DeleteRevision {
        track: TrackKind,
        revision_id: RevisionId,
    },
}

impl std::fmt::Display for StoreCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreCall::SetOverride { leaf, revision_id } => {
                write!(f, "set override {} → {}", leaf, revision_id)
            }
            StoreCall::ClearOverride { leaf } => write!(f, "clear override {}", leaf),
            StoreCall::ClearAllOverrides => write!(f, "clear all overrides"),
            StoreCall::DeleteRevision { track, revision_id } => {
                write!(f, "delete {} revision {}", track, revision_id)
            }
        }
    }
}

/// State change produced by one dispatch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    /// Whether in-memory state changed
    pub changed: bool,

    /// Calls to issue, all independent of each other
    pub calls: Vec<StoreCall>,
}

impl Dispatch {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn local(changed: bool) -> Self {
        Self {
            changed,
            calls: Vec::new(),
        }
    }

    pub fn with_calls(changed: bool, calls: Vec<StoreCall>) -> Self {
        Self { changed, calls }
    }
}
