//! # Composition Resolver
//!
//! Builds the hybrid rich-content document shown as "current".
//!
//! ```text
//! base revision   live revision if present, else newest
//! topology        exactly the base's sections and module counts
//! each leaf       override entry → live pointer → base
//!                 (falls back to the base module when the source
//!                  revision is gone or lacks the leaf)
//! ```
//!
//! `compose` is pure and keeps no state between calls; callers recompute it
//! after every state change instead of patching a previous result.

use serde::Serialize;
use std::collections::HashSet;
use vellum_model::{
    LeafAddress, Module, Revision, RevisionId, RichContent, Section, SectionType, Track,
};

use crate::overrides::OverrideTable;

/// A module together with the revision it was taken from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedModule {
    pub address: LeafAddress,
    pub source: RevisionId,
    pub module: Module,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedSection {
    pub section_type: SectionType,
    pub modules: Vec<ComposedModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedDocument {
    /// Revision whose topology the document follows
    pub base: RevisionId,
    pub sections: Vec<ComposedSection>,
}

impl ComposedDocument {
    /// Plain payload, without provenance
    pub fn to_rich_content(&self) -> RichContent {
        RichContent {
            sections: self
                .sections
                .iter()
                .map(|section| Section {
                    section_type: section.section_type.clone(),
                    modules: section.modules.iter().map(|m| m.module.clone()).collect(),
                })
                .collect(),
        }
    }

    pub fn modules(&self) -> impl Iterator<Item = &ComposedModule> {
        self.sections.iter().flat_map(|section| section.modules.iter())
    }

    pub fn module_at(&self, address: &LeafAddress) -> Option<&ComposedModule> {
        self.modules().find(|module| &module.address == address)
    }

    /// Whether any leaf is sourced outside the base revision
    pub fn is_hybrid(&self) -> bool {
        self.modules().any(|module| module.source != self.base)
    }
}

/// Live revision if the track holds it, else the newest one
pub fn base_revision<'a>(
    track: &'a Track<RichContent>,
    live: Option<&RevisionId>,
) -> Option<&'a Revision<RichContent>> {
    live.and_then(|id| track.find(id)).or_else(|| track.newest())
}

pub fn compose(
    track: &Track<RichContent>,
    overrides: &OverrideTable,
    live: Option<&RevisionId>,
) -> Option<ComposedDocument> {
    let base = base_revision(track, live)?;
    let mut seen = HashSet::new();

    let sections = base
        .payload
        .sections
        .iter()
        .map(|section| {
            // Only the first section of a type is addressable; repeats keep base content.
            let addressable = seen.insert(&section.section_type);

            let modules = section
                .modules
                .iter()
                .enumerate()
                .map(|(position, base_module)| {
                    let address = LeafAddress {
                        section_type: section.section_type.clone(),
                        module_position: position,
                    };

                    let sourced = if addressable {
                        resolve_leaf(track, overrides, live, &address)
                    } else {
                        None
                    };

                    let (source, module) = match sourced {
                        Some((revision, module)) => (revision.id.clone(), module.clone()),
                        None => (base.id.clone(), base_module.clone()),
                    };

                    ComposedModule {
                        address,
                        source,
                        module,
                    }
                })
                .collect();

            ComposedSection {
                section_type: section.section_type.clone(),
                modules,
            }
        })
        .collect();

    Some(ComposedDocument {
        base: base.id.clone(),
        sections,
    })
}

/// Source revision and module for one leaf, if the effective revision has it
fn resolve_leaf<'a>(
    track: &'a Track<RichContent>,
    overrides: &OverrideTable,
    live: Option<&RevisionId>,
    address: &LeafAddress,
) -> Option<(&'a Revision<RichContent>, &'a Module)> {
    let effective = overrides.effective_revision_for(address, live)?;
    let revision = track.find(effective)?;
    let module = revision.payload.module_at(address)?;
    Some((revision, module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn module(headline: &str) -> Module {
        Module {
            headline: headline.to_string(),
            body: format!("{} body", headline),
            images: vec![],
        }
    }

    fn revision(id: &str, seq: u64, sections: Vec<(&str, Vec<&str>)>) -> Revision<RichContent> {
        Revision {
            id: RevisionId::from(id),
            seq,
            created_at: Utc::now(),
            payload: RichContent {
                sections: sections
                    .into_iter()
                    .map(|(kind, modules)| Section {
                        section_type: kind.into(),
                        modules: modules.into_iter().map(module).collect(),
                    })
                    .collect(),
            },
        }
    }

    fn track() -> Track<RichContent> {
        Track::new(vec![
            revision("r3", 3, vec![("hero", vec!["h3"]), ("specs", vec!["s3a", "s3b"])]),
            revision("r2", 2, vec![("hero", vec!["h2"]), ("specs", vec!["s2a", "s2b"])]),
            revision("r1", 1, vec![("hero", vec!["h1"])]),
        ])
    }

    fn headlines(doc: &ComposedDocument) -> Vec<&str> {
        doc.modules().map(|m| m.module.headline.as_str()).collect()
    }

    #[test]
    fn test_empty_track_composes_nothing() {
        let empty = Track::<RichContent>::default();
        assert!(compose(&empty, &OverrideTable::new(), None).is_none());
    }

    #[test]
    fn test_no_overrides_reproduces_live_revision() {
        let live = RevisionId::from("r2");
        let doc = compose(&track(), &OverrideTable::new(), Some(&live)).unwrap();

        assert_eq!(doc.base, live);
        assert_eq!(doc.to_rich_content(), track().find(&live).unwrap().payload);
        assert!(!doc.is_hybrid());
    }

    #[test]
    fn test_no_live_uses_newest() {
        let doc = compose(&track(), &OverrideTable::new(), None).unwrap();
        assert_eq!(doc.base.as_str(), "r3");
        assert_eq!(headlines(&doc), vec!["h3", "s3a", "s3b"]);
    }

    #[test]
    fn test_single_override_changes_one_leaf() {
        let live = RevisionId::from("r3");
        let mut table = OverrideTable::new();
        table.set_leaf_override(LeafAddress::new("specs", 1), "r2".into(), Some(&live));

        let doc = compose(&track(), &table, Some(&live)).unwrap();
        assert_eq!(headlines(&doc), vec!["h3", "s3a", "s2b"]);
        assert_eq!(
            doc.module_at(&LeafAddress::new("specs", 1)).unwrap().source.as_str(),
            "r2"
        );
        assert!(doc.is_hybrid());
    }

    #[test]
    fn test_override_missing_leaf_falls_back_to_base() {
        let live = RevisionId::from("r3");
        let mut table = OverrideTable::new();
        // r1 has no specs section
        table.set_leaf_override(LeafAddress::new("specs", 0), "r1".into(), Some(&live));
        table.set_leaf_override(LeafAddress::new("hero", 0), "deleted".into(), Some(&live));

        let doc = compose(&track(), &table, Some(&live)).unwrap();
        assert_eq!(headlines(&doc), vec!["h3", "s3a", "s3b"]);
        assert!(!doc.is_hybrid());
    }

    #[test]
    fn test_topology_follows_base_only() {
        let live = RevisionId::from("r1");
        let mut table = OverrideTable::new();
        table.set_leaf_override(LeafAddress::new("specs", 0), "r3".into(), Some(&live));
        table.set_leaf_override(LeafAddress::new("hero", 0), "r3".into(), Some(&live));

        let doc = compose(&track(), &table, Some(&live)).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(headlines(&doc), vec!["h3"]);
    }

    #[test]
    fn test_stale_live_pointer_uses_newest_base() {
        let stale = RevisionId::from("r0");
        let doc = compose(&track(), &OverrideTable::new(), Some(&stale)).unwrap();
        assert_eq!(doc.base.as_str(), "r3");
        assert_eq!(headlines(&doc), vec!["h3", "s3a", "s3b"]);
    }

    #[test]
    fn test_override_on_repeated_section_type_touches_first_only() {
        let repeated = Track::new(vec![
            revision("r2", 2, vec![("hero", vec!["h2"]), ("hero", vec!["x2"])]),
            revision("r1", 1, vec![("hero", vec!["h1"]), ("hero", vec!["x1"])]),
        ]);
        let live = RevisionId::from("r2");
        let mut table = OverrideTable::new();
        table.set_leaf_override(LeafAddress::new("hero", 0), "r1".into(), Some(&live));

        let doc = compose(&repeated, &table, Some(&live)).unwrap();
        assert_eq!(headlines(&doc), vec!["h1", "x2"]);
        assert_eq!(doc.sections[0].modules[0].source.as_str(), "r1");
        assert_eq!(doc.sections[1].modules[0].source.as_str(), "r2");
    }
}
