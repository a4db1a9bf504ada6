use crate::common::timestamp_utils;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Start-of-image marker every JPEG begins with.
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// `<dir>/rpi_photo_<unix seconds>.jpg`
pub fn default_capture_path(dir: &Path) -> PathBuf {
    dir.join(format!("rpi_photo_{}.jpg", timestamp_utils::unix_timestamp_secs()))
}

pub fn ensure_parent_directory(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            debug!("Creating directory '{}' for capture output.", parent.display());
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string())
}

pub fn starts_with_jpeg_soi(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_SOI)
}

/// Deletes the local copy of an uploaded image. Failures are logged and
/// swallowed; returns whether the file is gone.
pub fn remove_local_copy(path: &Path) -> bool {
    if !path.exists() {
        debug!("Local file '{}' already gone, nothing to clean up.", path.display());
        return true;
    }
    match fs::remove_file(path) {
        Ok(()) => {
            info!("🧹 Cleaned up local file: {}", path.display());
            true
        }
        Err(e) => {
            warn!("⚠️ Could not delete local file '{}': {}", path.display(), e);
            false
        }
    }
}
