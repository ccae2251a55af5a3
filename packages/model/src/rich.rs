//! Hierarchical rich-content payload: sections holding modules.
//!
//! Individual modules are addressed across revisions by [`LeafAddress`],
//! a (section type, module position) pair. Two revisions that share a
//! section/module layout share the same addresses even when the content
//! behind them differs.

use crate::error::ModelError;
use crate::payload::ImageEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Section discriminator (e.g. `hero`, `comparison`, `feature-grid`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionType(String);

impl SectionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of one module slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeafAddress {
    pub section_type: SectionType,
    pub module_position: usize,
}

impl LeafAddress {
    pub fn new(section_type: impl Into<String>, module_position: usize) -> Self {
        Self {
            section_type: SectionType::new(section_type),
            module_position,
        }
    }
}

impl fmt::Display for LeafAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.section_type, self.module_position)
    }
}

/// Parses the `section#position` form used on the command line
impl FromStr for LeafAddress {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (section, position) = s
            .rsplit_once('#')
            .ok_or_else(|| ModelError::InvalidLeafAddress(s.to_string()))?;
        if section.is_empty() {
            return Err(ModelError::InvalidLeafAddress(s.to_string()));
        }
        let module_position = position
            .parse()
            .map_err(|_| ModelError::InvalidLeafAddress(s.to_string()))?;
        Ok(LeafAddress::new(section, module_position))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub headline: String,
    pub body: String,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

impl Module {
    /// Structural fingerprint used to detect whether a leaf changed
    pub fn signature(&self) -> ModuleSignature<'_> {
        ModuleSignature {
            headline: &self.headline,
            body: &self.body,
            images: self.images.iter().map(|image| image.src.as_str()).collect(),
        }
    }
}

/// Equal for two modules iff headline, body and the ordered primary image
/// references are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleSignature<'a> {
    pub headline: &'a str,
    pub body: &'a str,
    pub images: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_type: SectionType,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichContent {
    pub sections: Vec<Section>,
}

impl RichContent {
    /// First section of the given type
    pub fn section(&self, section_type: &SectionType) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| &section.section_type == section_type)
    }

    pub fn module_at(&self, address: &LeafAddress) -> Option<&Module> {
        self.section(&address.section_type)?
            .modules
            .get(address.module_position)
    }

    /// Every address of this topology, in document order.
    ///
    /// A repeated section type only contributes its first occurrence, since
    /// [`RichContent::module_at`] can never reach the later ones.
    pub fn leaf_addresses(&self) -> Vec<LeafAddress> {
        let mut seen = HashSet::new();
        let mut addresses = Vec::new();

        for section in &self.sections {
            if !seen.insert(&section.section_type) {
                continue;
            }
            for position in 0..section.modules.len() {
                addresses.push(LeafAddress {
                    section_type: section.section_type.clone(),
                    module_position: position,
                });
            }
        }

        addresses
    }
}
