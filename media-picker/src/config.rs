use crate::error::PickerError;
use serde::{Deserialize, Serialize};

/// Default bounds applied to still images before they are handed out
pub const DEFAULT_MAX_WIDTH: f64 = 1500.0;
pub const DEFAULT_MAX_HEIGHT: f64 = 2000.0;

const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Configuration for one presentation of the capture flow
///
/// All fields have defaults, so hosts can pass partial JSON/TOML documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickerConfig {
    /// Whether to allow selecting a photo
    pub allows_photo: bool,
    /// Whether to allow selecting a video
    pub allows_video: bool,
    /// Whether to allow capturing a photo/video with the camera
    pub allows_take: bool,
    /// Whether to allow selecting existing media
    pub allows_select_from_library: bool,
    /// Whether the picker offers its editing step after capture/selection
    pub allows_editing: bool,
    /// Start the camera in selfie mode when a front camera exists
    pub defaults_to_front_camera: bool,
    /// Use a full screen camera instead of a popover on tablets
    pub tablet_uses_full_screen_camera: bool,
    pub resize_bounds: ResizeBounds,
    /// Custom UI text, skips localization
    pub labels: Labels,
    /// Rect to anchor popovers at on tablets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Rect>,
    pub output: OutputFormat,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            allows_photo: true,
            allows_video: true,
            allows_take: true,
            allows_select_from_library: true,
            allows_editing: false,
            defaults_to_front_camera: false,
            tablet_uses_full_screen_camera: false,
            resize_bounds: ResizeBounds::default(),
            labels: Labels::default(),
            anchor: None,
            output: OutputFormat::default(),
        }
    }
}

impl PickerConfig {
    /// Photo-only preset
    pub fn photos_only() -> Self {
        Self {
            allows_video: false,
            ..Self::default()
        }
    }

    /// Video-only preset
    pub fn videos_only() -> Self {
        Self {
            allows_photo: false,
            ..Self::default()
        }
    }

    /// Parses a configuration as passed by a host runtime (JSON arguments)
    pub fn from_json(s: &str) -> Result<Self, PickerError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration file
    pub fn from_toml(s: &str) -> Result<Self, PickerError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        self.resize_bounds.validate()?;
        if let OutputFormat::Jpeg { quality } = self.output {
            if quality == 0 || quality > 100 {
                return Err(PickerError::InvalidConfig(format!(
                    "JPEG quality must be within 1..=100, got {}",
                    quality
                )));
            }
        }
        Ok(())
    }
}

/// Maximum size of a still image after normalization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResizeBounds {
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for ResizeBounds {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl ResizeBounds {
    pub fn new(max_width: f64, max_height: f64) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        let usable = |v: f64| v.is_finite() && v >= 1.0;
        if !usable(self.max_width) || !usable(self.max_height) {
            return Err(PickerError::InvalidConfig(format!(
                "resize bounds must be at least one pixel, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        Ok(())
    }
}

/// Every string the flow shows to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKey {
    Cancel,
    ChooseFromLibrary,
    ChooseFromPhotoRoll,
    NoSources,
    TakePhoto,
    TakeVideo,
}

impl LabelKey {
    pub const ALL: [LabelKey; 6] = [
        LabelKey::Cancel,
        LabelKey::ChooseFromLibrary,
        LabelKey::ChooseFromPhotoRoll,
        LabelKey::NoSources,
        LabelKey::TakePhoto,
        LabelKey::TakeVideo,
    ];

    /// English text used when neither an override nor a localization exists
    pub fn default_text(self) -> &'static str {
        match self {
            LabelKey::Cancel => "Cancel",
            LabelKey::ChooseFromLibrary => "Choose From Library",
            LabelKey::ChooseFromPhotoRoll => "Choose From PhotoRoll",
            LabelKey::NoSources => "No Sources",
            LabelKey::TakePhoto => "Take Photo",
            LabelKey::TakeVideo => "Take Video",
        }
    }

    /// Message id in the Fluent translation files
    pub fn message_id(self) -> &'static str {
        match self {
            LabelKey::Cancel => "picker-cancel",
            LabelKey::ChooseFromLibrary => "picker-choose-from-library",
            LabelKey::ChooseFromPhotoRoll => "picker-choose-from-photo-roll",
            LabelKey::NoSources => "picker-no-sources",
            LabelKey::TakePhoto => "picker-take-photo",
            LabelKey::TakeVideo => "picker-take-video",
        }
    }

    /// Translator note
    pub fn comment(self) -> &'static str {
        match self {
            LabelKey::Cancel => "Decline to proceed with operation",
            LabelKey::ChooseFromLibrary => "Option to select photo/video from library",
            LabelKey::ChooseFromPhotoRoll => "Option to select photo from photo roll",
            LabelKey::NoSources => "There are no sources available to select a photo",
            LabelKey::TakePhoto => "Option to take photo using camera",
            LabelKey::TakeVideo => "Option to take video using camera",
        }
    }
}

/// Optional caller-supplied label overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Labels {
    pub cancel: Option<String>,
    pub choose_from_library: Option<String>,
    pub choose_from_photo_roll: Option<String>,
    pub no_sources: Option<String>,
    pub take_photo: Option<String>,
    pub take_video: Option<String>,
}

impl Labels {
    pub fn get(&self, key: LabelKey) -> Option<&str> {
        let value = match key {
            LabelKey::Cancel => &self.cancel,
            LabelKey::ChooseFromLibrary => &self.choose_from_library,
            LabelKey::ChooseFromPhotoRoll => &self.choose_from_photo_roll,
            LabelKey::NoSources => &self.no_sources,
            LabelKey::TakePhoto => &self.take_photo,
            LabelKey::TakeVideo => &self.take_video,
        };
        value.as_deref()
    }

    /// Override if set, otherwise whatever `localize` produces
    pub fn resolve(&self, key: LabelKey, localize: impl FnOnce(LabelKey) -> String) -> String {
        match self.get(key) {
            Some(text) => text.to_string(),
            None => localize(key),
        }
    }
}

/// Rectangle in host surface coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 1x1 rect at the origin, used when no usable anchor was supplied
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Encoding of the normalized still image
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputFormat {
    /// PNG when the image carries alpha, JPEG otherwise
    #[default]
    Auto,
    Jpeg {
        quality: u8,
    },
    Png,
    #[serde(rename = "webp")]
    WebP,
}

impl OutputFormat {
    pub fn default_jpeg_quality() -> u8 {
        DEFAULT_JPEG_QUALITY
    }
}
