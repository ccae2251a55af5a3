//! # Entry State
//!
//! The single state container of one catalog entry: every track with its
//! navigator, the live pointers and the override table.
//!
//! All changes go through [`EntryState::dispatch`], which is synchronous and
//! never talks to the store. It returns the store calls the change implies so
//! the caller can persist them (see [`EditSession`](crate::EditSession)).
//!
//! ## Lifecycle
//!
//! ```text
//! store listing ──replace_track──→ TrackState (navigator at 0)
//!      │                                 │
//!      └──live / overrides──→ EntryState ├──dispatch(Command)──→ Dispatch
//!                                        └──compose / history / view
//! ```

use vellum_model::{
    BulletSet, Heading, ImageSet, LeafAddress, LivePointers, Payload, Revision, RevisionId,
    RichContent, Track, TrackKind, TrackPayload, Video,
};

use crate::bulk::apply_revision_to_all_leaves;
use crate::commands::{Command, Dispatch, StoreCall};
use crate::compose::{compose, ComposedDocument};
use crate::errors::{EditorError, EditorResult};
use crate::history::{compact_history, entry_index_for, HistoryEntry};
use crate::navigator::Navigator;
use crate::overrides::{LeafAssignment, OverrideTable};
use crate::preview::TrackView;

/// One track together with its browsing position
#[derive(Debug, Clone, PartialEq)]
pub struct TrackState<P> {
    track: Track<P>,
    navigator: Navigator,
}

impl<P> Default for TrackState<P> {
    fn default() -> Self {
        Self {
            track: Track::default(),
            navigator: Navigator::new(),
        }
    }
}

impl<P> TrackState<P> {
    pub fn new(track: Track<P>) -> Self {
        Self {
            track,
            navigator: Navigator::new(),
        }
    }

    pub fn track(&self) -> &Track<P> {
        &self.track
    }

    pub fn navigator(&self) -> Navigator {
        self.navigator
    }

    /// Revision under the cursor
    pub fn current(&self) -> Option<&Revision<P>> {
        self.navigator.current(&self.track)
    }
}

impl<P: Clone> TrackState<P> {
    fn insert(&mut self, revision: Revision<P>) {
        self.track = self.track.with_revision(revision);
        self.navigator.reset();
    }

    fn remove(&mut self, id: &RevisionId) {
        self.track = self.track.without(id);
        self.navigator.clamp_to(self.track.len());
    }
}

/// Kind-erased access used for per-track commands
trait Browse {
    fn len(&self) -> usize;
    fn navigator_mut(&mut self) -> &mut Navigator;
    fn jump_to_live(&mut self, live: Option<&RevisionId>) -> bool;
    fn current_payload(&self) -> Option<Payload>;
}

impl<P: TrackPayload> Browse for TrackState<P> {
    fn len(&self) -> usize {
        self.track.len()
    }

    fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    fn jump_to_live(&mut self, live: Option<&RevisionId>) -> bool {
        self.navigator.jump_to_live(&self.track, live)
    }

    fn current_payload(&self) -> Option<Payload> {
        self.current().map(|revision| revision.payload.clone().into_payload())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryState {
    heading: TrackState<Heading>,
    bullets: TrackState<BulletSet>,
    images: TrackState<ImageSet>,
    video: TrackState<Video>,
    rich: TrackState<RichContent>,
    live: LivePointers,
    overrides: OverrideTable,

    /// Increments on every change
    version: u64,
}

impl EntryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn live(&self) -> &LivePointers {
        &self.live
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn heading(&self) -> &TrackState<Heading> {
        &self.heading
    }

    pub fn bullets(&self) -> &TrackState<BulletSet> {
        &self.bullets
    }

    pub fn images(&self) -> &TrackState<ImageSet> {
        &self.images
    }

    pub fn video(&self) -> &TrackState<Video> {
        &self.video
    }

    pub fn rich_content(&self) -> &TrackState<RichContent> {
        &self.rich
    }

    fn browse(&self, kind: TrackKind) -> &dyn Browse {
        match kind {
            TrackKind::Heading => &self.heading,
            TrackKind::Bullets => &self.bullets,
            TrackKind::Images => &self.images,
            TrackKind::Video => &self.video,
            TrackKind::RichContent => &self.rich,
        }
    }

    fn browse_mut(&mut self, kind: TrackKind) -> &mut dyn Browse {
        match kind {
            TrackKind::Heading => &mut self.heading,
            TrackKind::Bullets => &mut self.bullets,
            TrackKind::Images => &mut self.images,
            TrackKind::Video => &mut self.video,
            TrackKind::RichContent => &mut self.rich,
        }
    }

    pub fn track_len(&self, kind: TrackKind) -> usize {
        self.browse(kind).len()
    }

    pub fn contains(&self, kind: TrackKind, id: &RevisionId) -> bool {
        match kind {
            TrackKind::Heading => self.heading.track.contains(id),
            TrackKind::Bullets => self.bullets.track.contains(id),
            TrackKind::Images => self.images.track.contains(id),
            TrackKind::Video => self.video.track.contains(id),
            TrackKind::RichContent => self.rich.track.contains(id),
        }
    }

    /// Navigator position of a track
    pub fn position(&self, kind: TrackKind) -> usize {
        match kind {
            TrackKind::Heading => self.heading.navigator.index(),
            TrackKind::Bullets => self.bullets.navigator.index(),
            TrackKind::Images => self.images.navigator.index(),
            TrackKind::Video => self.video.navigator.index(),
            TrackKind::RichContent => self.rich.navigator.index(),
        }
    }

    /// Replace a track with a fresh store listing; its navigator resets to 0
    pub fn replace_track(
        &mut self,
        kind: TrackKind,
        revisions: Vec<Revision<Payload>>,
    ) -> EditorResult<()> {
        match kind {
            TrackKind::Heading => self.heading = TrackState::new(Track::from_store(revisions)?),
            TrackKind::Bullets => self.bullets = TrackState::new(Track::from_store(revisions)?),
            TrackKind::Images => self.images = TrackState::new(Track::from_store(revisions)?),
            TrackKind::Video => self.video = TrackState::new(Track::from_store(revisions)?),
            TrackKind::RichContent => self.rich = TrackState::new(Track::from_store(revisions)?),
        }
        self.version += 1;
        Ok(())
    }

    /// Add a freshly created revision; the track's navigator resets to 0
    pub fn insert_revision(&mut self, revision: Revision<Payload>) -> EditorResult<()> {
        match revision.kind() {
            TrackKind::Heading => self.heading.insert(revision.into_typed()?),
            TrackKind::Bullets => self.bullets.insert(revision.into_typed()?),
            TrackKind::Images => self.images.insert(revision.into_typed()?),
            TrackKind::Video => self.video.insert(revision.into_typed()?),
            TrackKind::RichContent => self.rich.insert(revision.into_typed()?),
        }
        self.version += 1;
        Ok(())
    }

    /// Load stored override rows, normalized against the current live pointer.
    ///
    /// Returns a clear call for every stored row that already equals live.
    pub fn load_overrides<I>(&mut self, entries: I) -> Vec<StoreCall>
    where
        I: IntoIterator<Item = (LeafAddress, RevisionId)>,
    {
        let entries: Vec<(LeafAddress, RevisionId)> = entries.into_iter().collect();
        let stale = entries
            .iter()
            .filter(|(_, revision_id)| self.rich_live() == Some(revision_id))
            .map(|(leaf, _)| StoreCall::ClearOverride { leaf: leaf.clone() })
            .collect();

        self.overrides = OverrideTable::from_entries(entries, self.rich_live());
        self.version += 1;
        stale
    }

    fn rich_live(&self) -> Option<&RevisionId> {
        self.live.get(TrackKind::RichContent)
    }

    /// Hybrid rich-content document, recomputed on every call
    pub fn compose(&self) -> Option<ComposedDocument> {
        compose(&self.rich.track, &self.overrides, self.rich_live())
    }

    pub fn history(&self, leaf: &LeafAddress) -> Vec<HistoryEntry> {
        compact_history(&self.rich.track, leaf)
    }

    /// Revision the leaf currently shows, if any
    pub fn effective_revision(&self, leaf: &LeafAddress) -> Option<&RevisionId> {
        self.overrides.effective_revision_for(leaf, self.rich_live())
    }

    /// What a renderer should show for a track.
    ///
    /// Scalar and list tracks show the revision under the cursor; the
    /// rich-content track shows the composed document.
    pub fn view(&self, kind: TrackKind) -> TrackView {
        let payload = match kind {
            TrackKind::RichContent => self
                .compose()
                .map(|doc| Payload::RichContent(doc.to_rich_content())),
            _ => self.browse(kind).current_payload(),
        };
        payload.map(TrackView::Content).unwrap_or(TrackView::Empty)
    }

    pub fn dispatch(&mut self, command: Command) -> EditorResult<Dispatch> {
        let name = command.name();
        let dispatch = self.apply(command)?;
        if dispatch.changed {
            self.version += 1;
        }

        tracing::debug!(
            command = name,
            changed = dispatch.changed,
            calls = dispatch.calls.len(),
            version = self.version,
            "dispatched"
        );
        Ok(dispatch)
    }

    fn apply(&mut self, command: Command) -> EditorResult<Dispatch> {
        match command {
            Command::StepOlder { track } => {
                let browse = self.browse_mut(track);
                let len = browse.len();
                Ok(Dispatch::local(browse.navigator_mut().step_older(len)))
            }

            Command::StepNewer { track } => {
                let browse = self.browse_mut(track);
                let len = browse.len();
                Ok(Dispatch::local(browse.navigator_mut().step_newer(len)))
            }

            Command::JumpToLive { track } => {
                let live = self.live.get(track).cloned();
                let moved = self.browse_mut(track).jump_to_live(live.as_ref());
                Ok(Dispatch::local(moved))
            }

            Command::LeafStepOlder { leaf } => Ok(self.step_leaf(leaf, true)),

            Command::LeafStepNewer { leaf } => Ok(self.step_leaf(leaf, false)),

            Command::LeafJumpToLive { leaf } => {
                let pinned = self.overrides.get(&leaf).is_some();
                let call = match self.rich_live().cloned() {
                    Some(live) => self.assign_leaf(leaf, live),
                    None => {
                        self.overrides.clear_leaf_override(&leaf);
                        StoreCall::ClearOverride { leaf }
                    }
                };
                Ok(Dispatch::with_calls(pinned, vec![call]))
            }

            Command::SetLeafOverride { leaf, revision_id } => {
                self.require_rich(&revision_id)?;
                let call = self.assign_leaf(leaf, revision_id);
                Ok(Dispatch::with_calls(true, vec![call]))
            }

            Command::ClearLeafOverride { leaf } => {
                let changed = self.overrides.clear_leaf_override(&leaf);
                Ok(Dispatch::with_calls(
                    changed,
                    vec![StoreCall::ClearOverride { leaf }],
                ))
            }

            Command::ClearAllOverrides => {
                let changed = self.overrides.clear_all_overrides();
                Ok(Dispatch::with_calls(changed, vec![StoreCall::ClearAllOverrides]))
            }

            Command::ApplyRevisionToAllLeaves { revision_id } => {
                self.require_rich(&revision_id)?;
                let live = self.live.get(TrackKind::RichContent).cloned();
                let calls = apply_revision_to_all_leaves(
                    &self.rich.track,
                    &mut self.overrides,
                    &revision_id,
                    live.as_ref(),
                );
                Ok(Dispatch::with_calls(!calls.is_empty(), calls))
            }

            Command::DeleteRevision { track, revision_id } => {
                self.delete_revision(track, revision_id)
            }

            Command::SetLivePointers { live } => {
                let changed = live != self.live;
                self.live = live;
                let dropped = self
                    .overrides
                    .normalize_against(self.live.get(TrackKind::RichContent));
                if !dropped.is_empty() {
                    tracing::debug!(count = dropped.len(), "dropped overrides equal to new live");
                }

                let calls: Vec<StoreCall> = dropped
                    .into_iter()
                    .map(|leaf| StoreCall::ClearOverride { leaf })
                    .collect();
                Ok(Dispatch::with_calls(changed || !calls.is_empty(), calls))
            }
        }
    }

    fn require_rich(&self, id: &RevisionId) -> EditorResult<()> {
        if self.rich.track.contains(id) {
            Ok(())
        } else {
            Err(EditorError::unknown_revision(TrackKind::RichContent, id))
        }
    }

    fn assign_leaf(&mut self, leaf: LeafAddress, revision_id: RevisionId) -> StoreCall {
        let live = self.live.get(TrackKind::RichContent).cloned();
        match self
            .overrides
            .set_leaf_override(leaf.clone(), revision_id, live.as_ref())
        {
            LeafAssignment::Pinned(revision_id) => StoreCall::SetOverride { leaf, revision_id },
            LeafAssignment::FollowsLive => StoreCall::ClearOverride { leaf },
        }
    }

    /// Move one leaf through its compacted history
    fn step_leaf(&mut self, leaf: LeafAddress, older: bool) -> Dispatch {
        let history = self.history(&leaf);
        let start = entry_index_for(&history, self.effective_revision(&leaf));
        let mut navigator = Navigator::at(start, history.len());

        let moved = if older {
            navigator.step_older(history.len())
        } else {
            navigator.step_newer(history.len())
        };
        if !moved {
            return Dispatch::unchanged();
        }

        let target = history[navigator.index()].revision_id.clone();
        let call = self.assign_leaf(leaf, target);
        Dispatch::with_calls(true, vec![call])
    }

    fn delete_revision(&mut self, kind: TrackKind, id: RevisionId) -> EditorResult<Dispatch> {
        if !self.contains(kind, &id) {
            return Err(EditorError::unknown_revision(kind, &id));
        }

        match kind {
            TrackKind::Heading => self.heading.remove(&id),
            TrackKind::Bullets => self.bullets.remove(&id),
            TrackKind::Images => self.images.remove(&id),
            TrackKind::Video => self.video.remove(&id),
            TrackKind::RichContent => return Err(EditorError::DeleteNotSupported(kind)),
        }

        Ok(Dispatch::with_calls(
            true,
            vec![StoreCall::DeleteRevision {
                track: kind,
                revision_id: id,
            }],
        ))
    }
}
