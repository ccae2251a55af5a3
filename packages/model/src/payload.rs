//! Track kinds and their payload shapes.

use crate::error::{ModelError, ModelResult};
use crate::rich::RichContent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of bullets in a [`BulletSet`]
pub const MAX_BULLETS: usize = 5;

/// One independently versioned content kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackKind {
    Heading,
    Bullets,
    Images,
    Video,
    RichContent,
}

impl TrackKind {
    pub const ALL: [TrackKind; 5] = [
        TrackKind::Heading,
        TrackKind::Bullets,
        TrackKind::Images,
        TrackKind::Video,
        TrackKind::RichContent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Heading => "heading",
            TrackKind::Bullets => "bullets",
            TrackKind::Images => "images",
            TrackKind::Video => "video",
            TrackKind::RichContent => "rich-content",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownTrackKind(s.to_string()))
    }
}

/// Reference to an uploaded media object (URL or storage key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,
}

/// Up to five ordered, individually optional bullet strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletSet {
    pub bullets: [Option<String>; MAX_BULLETS],
}

impl BulletSet {
    /// Build a bullet set from lines; blank lines leave their slot empty
    pub fn from_lines<I, S>(lines: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.len() > MAX_BULLETS {
            return Err(ModelError::TooManyBullets {
                max: MAX_BULLETS,
                got: lines.len(),
            });
        }

        let mut set = BulletSet::default();
        for (slot, line) in set.bullets.iter_mut().zip(lines) {
            if !line.trim().is_empty() {
                *slot = Some(line);
            }
        }
        Ok(set)
    }

    /// Present bullets in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bullets.iter().filter_map(|b| b.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub media: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<MediaRef>,
}

/// Image with a display position and an optional higher-resolution variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub position: u32,
    pub src: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi_res: Option<MediaRef>,
}

impl ImageEntry {
    pub fn new(position: u32, src: impl Into<String>) -> Self {
        Self {
            position,
            src: MediaRef::new(src),
            hi_res: None,
        }
    }

    pub fn with_hi_res(mut self, hi_res: impl Into<String>) -> Self {
        self.hi_res = Some(MediaRef::new(hi_res));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    pub images: Vec<ImageEntry>,
}

/// Payload of any track, as exchanged with the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Payload {
    Heading(Heading),
    Bullets(BulletSet),
    Images(ImageSet),
    Video(Video),
    RichContent(RichContent),
}

impl Payload {
    pub fn kind(&self) -> TrackKind {
        match self {
            Payload::Heading(_) => TrackKind::Heading,
            Payload::Bullets(_) => TrackKind::Bullets,
            Payload::Images(_) => TrackKind::Images,
            Payload::Video(_) => TrackKind::Video,
            Payload::RichContent(_) => TrackKind::RichContent,
        }
    }
}

/// Typed payload of one track kind
pub trait TrackPayload: Clone + Sized {
    const KIND: TrackKind;

    fn from_payload(payload: Payload) -> ModelResult<Self>;

    fn into_payload(self) -> Payload;
}

macro_rules! impl_track_payload {
    ($ty:ty, $variant:ident) => {
        impl TrackPayload for $ty {
            const KIND: TrackKind = TrackKind::$variant;

            fn from_payload(payload: Payload) -> ModelResult<Self> {
                match payload {
                    Payload::$variant(inner) => Ok(inner),
                    other => Err(ModelError::kind_mismatch(Self::KIND, other.kind())),
                }
            }

            fn into_payload(self) -> Payload {
                Payload::$variant(self)
            }
        }
    };
}

impl_track_payload!(Heading, Heading);
impl_track_payload!(BulletSet, Bullets);
impl_track_payload!(ImageSet, Images);
impl_track_payload!(Video, Video);
impl_track_payload!(RichContent, RichContent);
