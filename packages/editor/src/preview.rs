//! # Preview
//!
//! Renderer-side helper that keeps a surface's baseline intact.
//!
//! The first time a surface is about to show engine content, its original
//! state is captured. Whenever the engine later signals "no content" for
//! that track, the surface is put back to exactly that snapshot rather than
//! to whatever it showed last.
//!
//! ```text
//! show(Content) ──first time──→ capture() → baseline
//!       │                                      │
//!       └──────────→ project(view)             │
//! show(Empty) ─────→ restore(baseline) ←───────┘
//! ```

use vellum_model::Payload;

/// What the engine wants a renderer to show for one track
#[derive(Debug, Clone, PartialEq)]
pub enum TrackView {
    /// The track has no revisions
    Empty,
    Content(Payload),
}

/// A rendering region driven by one track
pub trait Surface {
    type Snapshot;

    fn capture(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: &Self::Snapshot);

    fn project(&mut self, view: &TrackView);
}

/// A surface plus its captured baseline
pub struct Preview<S: Surface> {
    surface: S,
    baseline: Option<S::Snapshot>,
}

impl<S: Surface> Preview<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            baseline: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn baseline(&self) -> Option<&S::Snapshot> {
        self.baseline.as_ref()
    }

    pub fn show(&mut self, view: &TrackView) {
        match view {
            TrackView::Empty => {
                if let Some(baseline) = &self.baseline {
                    self.surface.restore(baseline);
                }
            }
            TrackView::Content(_) => {
                if self.baseline.is_none() {
                    self.baseline = Some(self.surface.capture());
                }
                self.surface.project(view);
            }
        }
    }

    pub fn into_inner(self) -> S {
        self.surface
    }
}
