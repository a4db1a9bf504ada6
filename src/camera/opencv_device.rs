use crate::app_config::CameraSettings;
use crate::common::file_utils;
use crate::core::capture_source::CaptureSource;
use crate::errors::CaptureError;
use log::{debug, info, warn};
use opencv::{core as opencv_core, imgcodecs, prelude::*, videoio};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

fn cv_err(context: &str, err: opencv::Error) -> CaptureError {
    CaptureError::Camera(format!("{}: {}", context, err))
}

/// Camera sensor opened through OpenCV's `videoio` (V4L2 on a Pi).
pub struct OpenCvCamera {
    name: String,
    settings: CameraSettings,
    capture: Option<videoio::VideoCapture>,
}

impl OpenCvCamera {
    /// Opens the device, applies the still resolution and waits for the
    /// sensor to settle before returning.
    pub fn open(settings: &CameraSettings) -> Result<Self, CaptureError> {
        let name = format!("video{}", settings.device_index);
        debug!("Opening camera device '{}' ({}x{})", name, settings.width, settings.height);
        let open_start = Instant::now();

        let mut cap = videoio::VideoCapture::new(settings.device_index, videoio::CAP_ANY)
            .map_err(|e| cv_err("Failed to open camera device", e))?;
        let opened = cap
            .is_opened()
            .map_err(|e| cv_err("Failed to query camera state", e))?;
        if !opened {
            return Err(CaptureError::Camera(format!(
                "Camera device '{}' could not be opened (busy or not connected)",
                name
            )));
        }

        cap.set(videoio::CAP_PROP_FRAME_WIDTH, f64::from(settings.width))
            .map_err(|e| cv_err("Failed to set frame width", e))?;
        cap.set(videoio::CAP_PROP_FRAME_HEIGHT, f64::from(settings.height))
            .map_err(|e| cv_err("Failed to set frame height", e))?;
        debug!("Camera '{}' opened in {:?}", name, open_start.elapsed());

        thread::sleep(Duration::from_secs(settings.warmup_secs));
        info!("📷 Camera '{}' initialized successfully", name);

        Ok(Self {
            name,
            settings: settings.clone(),
            capture: Some(cap),
        })
    }
}

impl CaptureSource for OpenCvCamera {
    fn get_name(&self) -> String {
        self.name.clone()
    }

    fn get_type(&self) -> String {
        "opencv".to_string()
    }

    fn is_hardware(&self) -> bool {
        true
    }

    fn capture_image(&mut self, output_path: &Path) -> Result<PathBuf, CaptureError> {
        let cap = self
            .capture
            .as_mut()
            .ok_or_else(|| CaptureError::Camera(format!("Camera '{}' is not running", self.name)))?;

        info!("📸 Capturing photo...");
        let read_start = Instant::now();
        let mut frame = opencv_core::Mat::default();
        let grabbed = cap
            .read(&mut frame)
            .map_err(|e| cv_err("Frame read failed", e))?;
        if !grabbed || frame.empty() {
            return Err(CaptureError::Camera(format!(
                "Camera '{}' returned an empty frame",
                self.name
            )));
        }
        debug!("Frame read from '{}' in {:?}", self.name, read_start.elapsed());

        file_utils::ensure_parent_directory(output_path)?;
        let path_str = output_path.to_str().ok_or_else(|| {
            CaptureError::Io(format!("Path is not valid UTF-8: {}", output_path.display()))
        })?;

        let mut params = opencv_core::Vector::<i32>::new();
        params.push(imgcodecs::IMWRITE_JPEG_QUALITY);
        params.push(i32::from(self.settings.jpeg_quality));

        let written = imgcodecs::imwrite(path_str, &frame, &params)
            .map_err(|e| cv_err("JPEG encode failed", e))?;
        if !written {
            return Err(CaptureError::Io(format!(
                "OpenCV could not write '{}'",
                output_path.display()
            )));
        }
        info!("✅ Photo captured: {}", output_path.display());
        Ok(output_path.to_path_buf())
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        if let Some(mut cap) = self.capture.take() {
            cap.release()
                .map_err(|e| cv_err("Failed to stop camera stream", e))?;
            info!("⏹️ Camera '{}' stopped", self.name);
        }
        Ok(())
    }
}

impl Drop for OpenCvCamera {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("⚠️ Error stopping camera '{}': {}", self.name, e);
        }
    }
}
