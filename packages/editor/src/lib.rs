//! # Vellum Editor
//!
//! Revision and override composition engine for one catalog entry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ store: revision history + live pointers     │
//! │        + per-leaf override rows             │
//! └─────────────────────────────────────────────┘
//!                     ↓ load / reload
//! ┌─────────────────────────────────────────────┐
//! │ editor: EntryState + commands               │
//! │  - Navigator per track                      │
//! │  - Compacted per-leaf history               │
//! │  - Override table (rich content only)       │
//! │  - Bulk reassignment                        │
//! └─────────────────────────────────────────────┘
//!                     ↓ compose
//! ┌─────────────────────────────────────────────┐
//! │ ComposedDocument → preview / media export   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **History is immutable**: the engine only chooses which revision fills
//!    a leaf, it never changes topology
//! 2. **Normalized overrides**: an entry equal to the live pointer is never
//!    stored
//! 3. **Derived composition**: the composed document is recomputed from
//!    scratch after every change
//! 4. **Optimistic persistence**: local state changes first, failed store
//!    calls are reported, not rolled back
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vellum_editor::{Command, EditSession};
//! use vellum_model::LeafAddress;
//!
//! let mut session = EditSession::load(store).await?;
//!
//! // Walk one module back through its own history
//! let report = session
//!     .dispatch(Command::LeafStepOlder {
//!         leaf: LeafAddress::new("hero", 0),
//!     })
//!     .await?;
//!
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.call, failure.error);
//! }
//!
//! let document = session.state().compose();
//! ```

pub mod bulk;
pub mod compose;
pub mod history;
pub mod navigator;
pub mod overrides;

mod commands;
mod errors;
mod export;
mod preview;
mod session;
mod state;

pub use bulk::apply_revision_to_all_leaves;
pub use commands::{Command, Dispatch, StoreCall};
pub use compose::{base_revision, compose, ComposedDocument, ComposedModule, ComposedSection};
pub use errors::{EditorError, EditorResult};
pub use export::{media_references, MediaReference, MediaRole};
pub use history::{compact_history, entry_index_for, HistoryEntry};
pub use navigator::Navigator;
pub use overrides::{LeafAssignment, OverrideTable};
pub use preview::{Preview, Surface, TrackView};
pub use session::{DispatchReport, EditSession, FailedCall};
pub use state::{EntryState, TrackState};
