//! # Bulk Reassigner
//!
//! Points every leaf of the layout revision at one revision.
//!
//! The layout is the live revision when the track holds it, else the newest
//! one, which is the same base the composition resolver uses. Leaves outside
//! that topology are never touched.

use vellum_model::{RevisionId, RichContent, Track};

use crate::commands::StoreCall;
use crate::compose::base_revision;
use crate::overrides::{LeafAssignment, OverrideTable};

/// Update `table` for every layout leaf and return one call per leaf
pub fn apply_revision_to_all_leaves(
    track: &Track<RichContent>,
    table: &mut OverrideTable,
    revision_id: &RevisionId,
    live: Option<&RevisionId>,
) -> Vec<StoreCall> {
    let Some(layout) = base_revision(track, live) else {
        return Vec::new();
    };

    layout
        .payload
        .leaf_addresses()
        .into_iter()
        .map(|leaf| {
            match table.set_leaf_override(leaf.clone(), revision_id.clone(), live) {
                LeafAssignment::Pinned(revision_id) => StoreCall::SetOverride { leaf, revision_id },
                LeafAssignment::FollowsLive => StoreCall::ClearOverride { leaf },
            }
        })
        .collect()
}
