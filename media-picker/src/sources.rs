use crate::config::{LabelKey, PickerConfig};
use serde::{Deserialize, Serialize};

/// Where the underlying picker takes its media from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Camera,
    PhotoLibrary,
    SavedPhotosAlbum,
}

/// One entry of the selection sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceAction {
    TakePhoto,
    TakeVideo,
    ChooseFromLibrary,
    ChooseFromPhotoRoll,
}

impl SourceAction {
    pub fn kind(self) -> SourceKind {
        match self {
            SourceAction::TakePhoto | SourceAction::TakeVideo => SourceKind::Camera,
            SourceAction::ChooseFromLibrary => SourceKind::PhotoLibrary,
            SourceAction::ChooseFromPhotoRoll => SourceKind::SavedPhotosAlbum,
        }
    }

    pub fn label_key(self) -> LabelKey {
        match self {
            SourceAction::TakePhoto => LabelKey::TakePhoto,
            SourceAction::TakeVideo => LabelKey::TakeVideo,
            SourceAction::ChooseFromLibrary => LabelKey::ChooseFromLibrary,
            SourceAction::ChooseFromPhotoRoll => LabelKey::ChooseFromPhotoRoll,
        }
    }
}

/// What the device can offer right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub camera: bool,
    pub front_camera: bool,
    pub photo_library: bool,
    pub saved_photos_album: bool,
}

impl Capabilities {
    /// Everything available, handy for hosts that cannot probe
    pub fn all() -> Self {
        Self {
            camera: true,
            front_camera: true,
            photo_library: true,
            saved_photos_album: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOption {
    pub action: SourceAction,
    pub kind: SourceKind,
}

impl From<SourceAction> for SourceOption {
    fn from(action: SourceAction) -> Self {
        Self {
            action,
            kind: action.kind(),
        }
    }
}

/// Builds the selection list in fixed priority order:
/// take photo, take video, choose from library, choose from photo roll.
pub fn build_sources(config: &PickerConfig, caps: &Capabilities) -> Vec<SourceOption> {
    let candidates = [
        (
            SourceAction::TakePhoto,
            config.allows_take && config.allows_photo && caps.camera,
        ),
        (
            SourceAction::TakeVideo,
            config.allows_take && config.allows_video && caps.camera,
        ),
        (
            SourceAction::ChooseFromLibrary,
            config.allows_select_from_library && caps.photo_library,
        ),
        (
            SourceAction::ChooseFromPhotoRoll,
            config.allows_select_from_library && caps.saved_photos_album,
        ),
    ];

    let sources: Vec<SourceOption> = candidates
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(action, _)| SourceOption::from(action))
        .collect();

    log::debug!(
        "Built {} source(s): {:?}",
        sources.len(),
        sources.iter().map(|s| s.action).collect::<Vec<_>>()
    );

    sources
}
