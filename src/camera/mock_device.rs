use crate::common::file_utils;
use crate::core::capture_source::CaptureSource;
use crate::errors::CaptureError;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest byte sequence the backend accepts as a JPEG: SOI, a JFIF APP0
/// segment and EOI.
pub const PLACEHOLDER_JPEG: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00\x01\x01\x01\x00H\x00H\x00\x00\xff\xd9";

#[derive(Debug, Default)]
pub struct MockCamera {
    captures: u64,
}

impl MockCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captures(&self) -> u64 {
        self.captures
    }
}

impl CaptureSource for MockCamera {
    fn get_name(&self) -> String {
        "mock-camera".to_string()
    }

    fn get_type(&self) -> String {
        "mock".to_string()
    }

    fn is_hardware(&self) -> bool {
        false
    }

    fn capture_image(&mut self, output_path: &Path) -> Result<PathBuf, CaptureError> {
        info!("🧪 Mock mode: Creating dummy photo at {}", output_path.display());
        file_utils::ensure_parent_directory(output_path)?;
        fs::write(output_path, PLACEHOLDER_JPEG)?;
        self.captures += 1;
        Ok(output_path.to_path_buf())
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}
