// Translates a chosen sheet action into the settings of the underlying picker.

use crate::config::{PickerConfig, Rect};
use crate::sources::{Capabilities, SourceAction, SourceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Movie,
}

impl MediaType {
    /// Uniform type identifier used by native pickers
    pub fn type_identifier(self) -> &'static str {
        match self {
            MediaType::Image => "public.image",
            MediaType::Movie => "public.movie",
        }
    }

    pub fn from_type_identifier(s: &str) -> Option<Self> {
        match s {
            "public.image" => Some(MediaType::Image),
            "public.movie" => Some(MediaType::Movie),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraDevice {
    Rear,
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceIdiom {
    #[default]
    Phone,
    Tablet,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    FullScreen,
    Popover { anchor: Rect },
}

/// Everything a host needs to show its native picker
#[derive(Debug, Clone, PartialEq)]
pub struct PickerRequest {
    pub action: SourceAction,
    pub source: SourceKind,
    pub media_types: Vec<MediaType>,
    pub allows_editing: bool,
    pub camera_device: CameraDevice,
    pub presentation: Presentation,
}

impl PickerRequest {
    pub fn new(
        config: &PickerConfig,
        action: SourceAction,
        caps: &Capabilities,
        idiom: DeviceIdiom,
    ) -> Self {
        let source = action.kind();

        let media_types = match action {
            SourceAction::TakePhoto => vec![MediaType::Image],
            SourceAction::TakeVideo => vec![MediaType::Movie],
            SourceAction::ChooseFromLibrary | SourceAction::ChooseFromPhotoRoll => {
                let mut types = Vec::with_capacity(2);
                if config.allows_photo {
                    types.push(MediaType::Image);
                }
                if config.allows_video {
                    types.push(MediaType::Movie);
                }
                types
            }
        };

        let camera_device = if source == SourceKind::Camera
            && config.defaults_to_front_camera
            && caps.front_camera
        {
            CameraDevice::Front
        } else {
            CameraDevice::Rear
        };

        let full_screen = idiom == DeviceIdiom::Phone
            || (source == SourceKind::Camera && config.tablet_uses_full_screen_camera);
        let presentation = if full_screen {
            Presentation::FullScreen
        } else {
            Presentation::Popover {
                anchor: popover_anchor(config.anchor),
            }
        };

        Self {
            action,
            source,
            media_types,
            allows_editing: config.allows_editing,
            camera_device,
            presentation,
        }
    }

    pub fn accepts(&self, media_type: MediaType) -> bool {
        self.media_types.contains(&media_type)
    }
}

/// Popovers need a non-empty anchor
pub fn popover_anchor(anchor: Option<Rect>) -> Rect {
    match anchor {
        Some(rect) if !rect.is_empty() => rect,
        _ => Rect::unit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types_per_action() {
        let config = PickerConfig::default();
        let caps = Capabilities::all();

        let photo = PickerRequest::new(&config, SourceAction::TakePhoto, &caps, DeviceIdiom::Phone);
        assert_eq!(photo.media_types, vec![MediaType::Image]);

        let video = PickerRequest::new(&config, SourceAction::TakeVideo, &caps, DeviceIdiom::Phone);
        assert_eq!(video.media_types, vec![MediaType::Movie]);

        let library = PickerRequest::new(
            &config,
            SourceAction::ChooseFromLibrary,
            &caps,
            DeviceIdiom::Phone,
        );
        assert_eq!(library.media_types, vec![MediaType::Image, MediaType::Movie]);

        let photos_only = PickerRequest::new(
            &PickerConfig::photos_only(),
            SourceAction::ChooseFromPhotoRoll,
            &caps,
            DeviceIdiom::Phone,
        );
        assert_eq!(photos_only.media_types, vec![MediaType::Image]);
        assert_eq!(photos_only.source, SourceKind::SavedPhotosAlbum);
    }

    #[test]
    fn test_front_camera() {
        let config = PickerConfig {
            defaults_to_front_camera: true,
            ..PickerConfig::default()
        };
        let caps = Capabilities::all();

        let camera = PickerRequest::new(
            &config,
            SourceAction::TakePhoto,
            &caps,
            DeviceIdiom::Phone,
        );
        assert_eq!(camera.camera_device, CameraDevice::Front);

        // Library never uses the front camera
        let library = PickerRequest::new(
            &config,
            SourceAction::ChooseFromLibrary,
            &caps,
            DeviceIdiom::Phone,
        );
        assert_eq!(library.camera_device, CameraDevice::Rear);

        let no_front = Capabilities {
            front_camera: false,
            ..caps
        };
        let camera = PickerRequest::new(
            &config,
            SourceAction::TakePhoto,
            &no_front,
            DeviceIdiom::Phone,
        );
        assert_eq!(camera.camera_device, CameraDevice::Rear);
    }

    #[test]
    fn test_editing_flag_is_forwarded() {
        let config = PickerConfig {
            allows_editing: true,
            ..PickerConfig::default()
        };
        let request = PickerRequest::new(
            &config,
            SourceAction::TakePhoto,
            &Capabilities::all(),
            DeviceIdiom::Phone,
        );
        assert!(request.allows_editing);
    }

    #[test]
    fn test_presentation_style() {
        let caps = Capabilities::all();
        let config = PickerConfig {
            anchor: Some(Rect::new(100.0, 200.0, 40.0, 30.0)),
            ..PickerConfig::default()
        };

        let phone = PickerRequest::new(
            &config,
            SourceAction::ChooseFromLibrary,
            &caps,
            DeviceIdiom::Phone,
        );
        assert_eq!(phone.presentation, Presentation::FullScreen);

        let tablet = PickerRequest::new(
            &config,
            SourceAction::TakePhoto,
            &caps,
            DeviceIdiom::Tablet,
        );
        assert_eq!(
            tablet.presentation,
            Presentation::Popover {
                anchor: Rect::new(100.0, 200.0, 40.0, 30.0)
            }
        );

        let full_camera = PickerConfig {
            tablet_uses_full_screen_camera: true,
            ..config.clone()
        };
        let camera = PickerRequest::new(
            &full_camera,
            SourceAction::TakeVideo,
            &caps,
            DeviceIdiom::Tablet,
        );
        assert_eq!(camera.presentation, Presentation::FullScreen);
        let library = PickerRequest::new(
            &full_camera,
            SourceAction::ChooseFromLibrary,
            &caps,
            DeviceIdiom::Tablet,
        );
        assert!(matches!(library.presentation, Presentation::Popover { .. }));
    }

    #[test]
    fn test_empty_anchor_falls_back_to_unit_rect() {
        assert_eq!(popover_anchor(None), Rect::unit());
        assert_eq!(
            popover_anchor(Some(Rect::new(50.0, 50.0, 0.0, 0.0))),
            Rect::unit()
        );
    }

    #[test]
    fn test_type_identifiers() {
        assert_eq!(
            MediaType::from_type_identifier(MediaType::Movie.type_identifier()),
            Some(MediaType::Movie)
        );
        assert_eq!(MediaType::from_type_identifier("public.audio"), None);
    }
}
