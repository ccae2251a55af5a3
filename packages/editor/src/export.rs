//! Media references of a composed document, for archive export.

use serde::Serialize;
use vellum_model::{LeafAddress, MediaRef, RevisionId};

use crate::compose::ComposedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaRole {
    Primary,
    HiRes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaReference {
    pub address: LeafAddress,
    /// Revision the module was taken from
    pub source: RevisionId,
    pub image_position: u32,
    pub role: MediaRole,
    pub reference: MediaRef,
}

/// Every image reference in document order, primary before hi-res
pub fn media_references(document: &ComposedDocument) -> Vec<MediaReference> {
    let mut references = Vec::new();

    for composed in document.modules() {
        for image in &composed.module.images {
            let roles = std::iter::once((MediaRole::Primary, &image.src))
                .chain(image.hi_res.iter().map(|hi_res| (MediaRole::HiRes, hi_res)));

            for (role, reference) in roles {
                references.push(MediaReference {
                    address: composed.address.clone(),
                    source: composed.source.clone(),
                    image_position: image.position,
                    role,
                    reference: reference.clone(),
                });
            }
        }
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{ComposedModule, ComposedSection};
    use vellum_model::{ImageEntry, Module};

    #[test]
    fn test_references_in_document_order() {
        let document = ComposedDocument {
            base: "r2".into(),
            sections: vec![ComposedSection {
                section_type: "hero".into(),
                modules: vec![
                    ComposedModule {
                        address: LeafAddress::new("hero", 0),
                        source: "r1".into(),
                        module: Module {
                            headline: "A".into(),
                            body: String::new(),
                            images: vec![
                                ImageEntry::new(0, "a.png").with_hi_res("a@2x.png"),
                                ImageEntry::new(1, "b.png"),
                            ],
                        },
                    },
                    ComposedModule {
                        address: LeafAddress::new("hero", 1),
                        source: "r2".into(),
                        module: Module {
                            headline: "B".into(),
                            body: String::new(),
                            images: vec![ImageEntry::new(0, "c.png")],
                        },
                    },
                ],
            }],
        };

        let references = media_references(&document);
        let refs: Vec<_> = references.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(refs, vec!["a.png", "a@2x.png", "b.png", "c.png"]);

        assert_eq!(references[1].role, MediaRole::HiRes);
        assert_eq!(references[0].source.as_str(), "r1");
        assert_eq!(references[3].address, LeafAddress::new("hero", 1));
    }
}
