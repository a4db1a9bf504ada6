use crate::errors::CaptureError;
use std::path::{Path, PathBuf};

/// A still-image camera. One implementation talks to hardware, the other
/// synthesizes a placeholder JPEG so the upload path works without a camera.
pub trait CaptureSource: Send {
    fn get_name(&self) -> String;
    fn get_type(&self) -> String; // e.g., "mock", "opencv"

    /// True when frames come from a physical sensor.
    fn is_hardware(&self) -> bool;

    /// Captures one still image and writes it as JPEG to `output_path`.
    /// Returns the path that was written.
    fn capture_image(&mut self, output_path: &Path) -> Result<PathBuf, CaptureError>;

    /// Stops the sensor stream. Safe to call more than once.
    fn release(&mut self) -> Result<(), CaptureError>;
}
