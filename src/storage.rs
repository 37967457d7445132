use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Image extensions accepted for catalog uploads.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpe", "jpeg", "png", "gif", "svg", "bmp", "webp"];

/// Lowercased extension of an uploaded file name, if it is an accepted image type.
pub fn image_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Fresh stored name for an upload: a random token plus the original extension.
pub fn generate_filename(file_name: &str) -> AppResult<String> {
    let ext = image_extension(file_name).ok_or_else(|| {
        AppError::BadRequest(format!(
            "image must have one of the extensions: {}",
            IMAGE_EXTENSIONS.join(", ")
        ))
    })?;
    Ok(format!("{}.{ext}", Uuid::new_v4().simple()))
}

/// Write an uploaded image under `media_dir`, returning the stored file name.
pub async fn save_image(media_dir: &Path, file_name: &str, bytes: &[u8]) -> AppResult<String> {
    if bytes.is_empty() {
        return Err(AppError::BadRequest("image is empty".into()));
    }
    let stored = generate_filename(file_name)?;
    fs::create_dir_all(media_dir).await?;
    fs::write(media_dir.join(&stored), bytes).await?;
    tracing::debug!(file = %stored, size = bytes.len(), "image stored");
    Ok(stored)
}

/// Best-effort removal of a stored image.
pub async fn remove_image(media_dir: &Path, stored: &str) {
    let path: PathBuf = media_dir.join(stored);
    if let Err(err) = fs::remove_file(&path).await {
        tracing::warn!(error = %err, file = %stored, "failed to remove image");
    }
}
