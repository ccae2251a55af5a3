use crate::payload::TrackKind;
use crate::revision::RevisionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Server-designated live revision per track.
///
/// Independent of what an operator is browsing; may point at any revision,
/// not necessarily the newest, or at one that no longer exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LivePointers(BTreeMap<TrackKind, RevisionId>);

impl LivePointers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: TrackKind) -> Option<&RevisionId> {
        self.0.get(&kind)
    }

    /// Set or unset the pointer, returning the previous value
    pub fn set(&mut self, kind: TrackKind, id: Option<RevisionId>) -> Option<RevisionId> {
        match id {
            Some(id) => self.0.insert(kind, id),
            None => self.0.remove(&kind),
        }
    }

    pub fn with(mut self, kind: TrackKind, id: impl Into<RevisionId>) -> Self {
        self.0.insert(kind, id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_pointers_serialize_as_kind_map() {
        let live = LivePointers::new()
            .with(TrackKind::RichContent, "rev-9")
            .with(TrackKind::Heading, "rev-2");

        let json = serde_json::to_value(&live).unwrap();
        assert_eq!(json["rich-content"], "rev-9");
        assert_eq!(json["heading"], "rev-2");

        let back: LivePointers = serde_json::from_value(json).unwrap();
        assert_eq!(back, live);
    }

    #[test]
    fn test_set_none_clears_pointer() {
        let mut live = LivePointers::new().with(TrackKind::Video, "v1");
        let previous = live.set(TrackKind::Video, None);
        assert_eq!(previous, Some(RevisionId::from("v1")));
        assert_eq!(live.get(TrackKind::Video), None);
    }
}
