use crate::error::AppError;
use base64::Engine;
use media_picker::CapturedPhoto;
use std::path::{Path, PathBuf};

/// Data URL (Base64) for showing a captured photo in the webview
pub fn photo_data_url(photo: &CapturedPhoto) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(&photo.data);
    format!("data:{};base64,{}", photo.mime_type(), b64)
}

/// Writes the photo and a TOML sidecar with its metadata into `dir`.
/// Returns the path of the image file.
pub fn save_photo(photo: &CapturedPhoto, dir: &Path) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)?;

    let ext = photo
        .format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or("img");
    let stem = photo.metadata.session_id.to_string();

    let image_path = dir.join(format!("{}.{}", stem, ext));
    std::fs::write(&image_path, &photo.data)?;

    let metadata_path = dir.join(format!("{}.toml", stem));
    std::fs::write(&metadata_path, photo.metadata.to_toml()?)?;

    log::info!("Saved photo to {:?}", image_path);
    Ok(image_path)
}
