//! # Vellum Store
//!
//! Persistence contracts consumed by the editing engine, plus two adapters.
//!
//! ```text
//! RevisionStore  list / live pointers / create / delete   (every track)
//! OverrideStore  list / set / clear / clear all            (rich-content only)
//! ```
//!
//! - [`MemoryStore`]: in-process entry, used by tests and embedding callers.
//!   Supports failure injection so partial persistence failures can be
//!   exercised deterministically.
//! - [`JsonFileStore`]: one JSON document per catalog entry on disk, used by
//!   the CLI.
//!
//! Both adapters hold a single catalog entry. The engine never retries or
//! reconciles a failed call; it only reports it.

mod contract;
mod error;
mod file;
mod memory;
mod record;

pub use contract::{OverrideRecord, OverrideStore, RevisionStore};
pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::{MemoryStore, StoreOp};
pub use record::EntryRecord;

/// A store that serves both contracts for one entry
pub trait EntryStore: RevisionStore + OverrideStore {}

impl<T: RevisionStore + OverrideStore> EntryStore for T {}
