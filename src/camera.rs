// Platform side of the capture flow: what the device offers and the picker
// that runs once the user chose a source. Desktop builds use a file dialog
// as the photo library; mobile builds have no native bridge and report no
// sources.

use crate::error::AppError;
use media_picker::{Capabilities, MediaType, PickerInfo, PickerRequest};
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const MOVIE_EXTENSIONS: &[&str] = &["mov", "mp4", "m4v"];

/// Only the library is available here: [`run_picker`] serves it with a file
/// dialog and has no camera to offer.
#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub fn device_capabilities() -> Capabilities {
    Capabilities {
        photo_library: true,
        ..Capabilities::default()
    }
}

/// Mobile builds ship without a native picker bridge, so nothing is offered
/// and every session ends with the no-sources notice.
#[cfg(any(target_os = "android", target_os = "ios"))]
pub fn device_capabilities() -> Capabilities {
    Capabilities::default()
}

/// Media type by file extension, restricted to what the picker asked for
#[cfg_attr(any(target_os = "android", target_os = "ios"), allow(dead_code))]
pub fn media_type_for(path: &Path, request: &PickerRequest) -> Option<MediaType> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())?;

    let media_type = if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaType::Image
    } else if MOVIE_EXTENSIONS.contains(&ext.as_str()) {
        MediaType::Movie
    } else {
        return None;
    };

    request.accepts(media_type).then_some(media_type)
}

#[cfg_attr(any(target_os = "android", target_os = "ios"), allow(dead_code))]
fn allowed_extensions(request: &PickerRequest) -> Vec<&'static str> {
    let mut extensions = Vec::new();
    if request.accepts(MediaType::Image) {
        extensions.extend_from_slice(IMAGE_EXTENSIONS);
    }
    if request.accepts(MediaType::Movie) {
        extensions.extend_from_slice(MOVIE_EXTENSIONS);
    }
    extensions
}

/// Runs the picker for `request`. `Ok(None)` means the user cancelled it.
#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub async fn run_picker(request: &PickerRequest) -> Result<Option<PickerInfo>, AppError> {
    use media_picker::{PickedImage, SourceKind};

    if request.source == SourceKind::Camera {
        return Err(AppError::PlatformNotSupported(
            "Camera not available on this platform".to_string(),
        ));
    }

    let extensions = allowed_extensions(request);
    let Some(handle) = rfd::AsyncFileDialog::new()
        .add_filter("Media", extensions.as_slice())
        .pick_file()
        .await
    else {
        log::debug!("File dialog cancelled");
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    log::debug!("Picked {:?}", path);

    let info = match media_type_for(&path, request) {
        Some(MediaType::Image) => {
            let bytes = handle.read().await;
            PickerInfo::image(PickedImage::Encoded(bytes))
        }
        Some(MediaType::Movie) => PickerInfo::video(path),
        // Let the session decide how to resolve unusable picks
        None => PickerInfo::default(),
    };

    Ok(Some(info.with_extra(
        "file_name",
        serde_json::Value::String(handle.file_name()),
    )))
}

#[cfg(any(target_os = "android", target_os = "ios"))]
pub async fn run_picker(_request: &PickerRequest) -> Result<Option<PickerInfo>, AppError> {
    Err(AppError::PlatformNotSupported(
        "Native picker not available on this platform".to_string(),
    ))
}
