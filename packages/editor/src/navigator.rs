//! # Track Navigator
//!
//! Scroll position into a newest-first revision list.
//!
//! ```text
//! index:   0        1        2   ...   len-1
//!        newest ─────────────────────→ oldest
//!          ← step_newer      step_older →
//! ```
//!
//! Every move clamps; nothing here can fail. The same cursor drives both
//! whole-track browsing and leaf-scoped browsing over a compacted history.

use vellum_model::{Revision, RevisionId, Track};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor at `index`, clamped into a list of `len` items
    pub fn at(index: usize, len: usize) -> Self {
        let mut navigator = Self { index };
        navigator.clamp_to(len);
        navigator
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move one step towards the oldest entry. Returns whether it moved.
    pub fn step_older(&mut self, len: usize) -> bool {
        if len == 0 || self.index + 1 >= len {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move one step towards the newest entry. Returns whether it moved.
    pub fn step_newer(&mut self, len: usize) -> bool {
        if len == 0 || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jump to `target`, or to the oldest entry when there is no target.
    pub fn jump_to(&mut self, target: Option<usize>, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let index = target.filter(|&i| i < len).unwrap_or(len - 1);
        let moved = index != self.index;
        self.index = index;
        moved
    }

    /// Jump to the live revision.
    ///
    /// An unset or stale pointer lands on the oldest revision, not the
    /// newest.
    pub fn jump_to_live<P>(&mut self, track: &Track<P>, live: Option<&RevisionId>) -> bool {
        let target = live.and_then(|id| track.position_of(id));
        self.jump_to(target, track.len())
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Pull the index back inside `[0, len-1]` after the list shrank
    pub fn clamp_to(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
        } else if self.index >= len {
            self.index = len - 1;
        }
    }

    pub fn current<'a, P>(&self, track: &'a Track<P>) -> Option<&'a Revision<P>> {
        track.get(self.index)
    }
}
