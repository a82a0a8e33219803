use crate::processing::{self, ProcessingError};
use crate::request::MediaType;
use crate::sources::SourceKind;
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Terminal value of a capture session
#[derive(Debug, Clone)]
pub enum Outcome {
    Selected(MediaResult),
    /// The selection sheet was dismissed, or the picker returned no image
    Cancelled,
    /// The user backed out of the native picker after choosing a source
    Denied,
    /// A selection completed but its media could not be used
    Failed,
    /// Nothing to choose from, no sheet was shown
    NoSourcesAvailable,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Selected(MediaResult::Photo(_)) => OutcomeKind::Photo,
            Outcome::Selected(MediaResult::Video(_)) => OutcomeKind::Video,
            Outcome::Cancelled => OutcomeKind::Cancelled,
            Outcome::Denied => OutcomeKind::Denied,
            Outcome::Failed => OutcomeKind::Failed,
            Outcome::NoSourcesAvailable => OutcomeKind::NoSourcesAvailable,
        }
    }
}

/// Payload-free tag of an [`Outcome`], for logs and state bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Photo,
    Video,
    Cancelled,
    Denied,
    Failed,
    NoSourcesAvailable,
}

#[derive(Debug, Clone)]
pub enum MediaResult {
    Photo(CapturedPhoto),
    Video(CapturedVideo),
}

/// A normalized, encoded still image
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub metadata: MediaMetadata,
}

impl CapturedPhoto {
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapturedVideo {
    pub path: PathBuf,
    pub metadata: MediaMetadata,
}

/// Describes where a piece of media came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaMetadata {
    pub session_id: Uuid,
    pub media_type: MediaType,
    pub source: SourceKind,
    /// The picker's edited image was used instead of the original
    pub edited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_height: Option<u32>,
    pub captured_at: DateTime<Utc>,
    /// Additional keys reported by the native picker
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MediaMetadata {
    /// Converts to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

/// Image as handed back by a native picker
#[derive(Debug, Clone)]
pub enum PickedImage {
    Decoded(DynamicImage),
    /// Encoded file contents, may carry an EXIF orientation
    Encoded(Vec<u8>),
}

impl PickedImage {
    pub fn into_image(self) -> Result<DynamicImage, ProcessingError> {
        match self {
            PickedImage::Decoded(img) => Ok(img),
            PickedImage::Encoded(bytes) => processing::decode_oriented(&bytes),
        }
    }
}

/// Raw result of a finished native picker
#[derive(Debug, Clone, Default)]
pub struct PickerInfo {
    pub media_type: Option<MediaType>,
    pub edited_image: Option<PickedImage>,
    pub original_image: Option<PickedImage>,
    pub media_path: Option<PathBuf>,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PickerInfo {
    pub fn image(original: PickedImage) -> Self {
        Self {
            media_type: Some(MediaType::Image),
            original_image: Some(original),
            ..Self::default()
        }
    }

    pub fn video(path: impl Into<PathBuf>) -> Self {
        Self {
            media_type: Some(MediaType::Movie),
            media_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_edited(mut self, edited: PickedImage) -> Self {
        self.edited_image = Some(edited);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
