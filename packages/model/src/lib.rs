//! # Vellum Model
//!
//! Data model shared by the store adapters and the editing engine.
//!
//! A catalog entry carries five independently versioned tracks:
//!
//! ```text
//! heading       → Heading        (scalar)
//! bullets       → BulletSet      (scalar, up to five bullets)
//! video         → Video          (scalar)
//! images        → ImageSet       (ordered list)
//! rich-content  → RichContent    (sections → modules → images)
//! ```
//!
//! Every track is an immutable, newest-first list of [`Revision`]s. Only the
//! rich-content track is addressable below the revision level, through
//! [`LeafAddress`].

pub mod error;
pub mod live;
pub mod payload;
pub mod revision;
pub mod rich;

pub use error::{ModelError, ModelResult};
pub use live::LivePointers;
pub use payload::{
    BulletSet, Heading, ImageEntry, ImageSet, MediaRef, Payload, TrackKind, TrackPayload, Video,
    MAX_BULLETS,
};
pub use revision::{Revision, RevisionId, Track};
pub use rich::{LeafAddress, Module, ModuleSignature, RichContent, Section, SectionType};
