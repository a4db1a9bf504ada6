use crate::camera::mock_device::MockCamera;
use crate::common::file_utils;
use crate::config_loader::{validate_master_config, MasterConfig};
use crate::core::camera_manager::CameraManager;
use crate::core::capture_source::CaptureSource;
use crate::errors::{CaptureError, ConfigError, PipelineError, UploadError};
use crate::operations::image_upload_op::{HttpUploader, ImageSink, UploadReceipt};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Owns the configuration, the camera and the upload target for one run.
///
/// Construction validates the configuration and touches neither the camera
/// nor the network. Until [`Uploader::initialize_camera`] selects a source,
/// captures go to the mock camera.
pub struct Uploader {
    config: MasterConfig,
    camera: Box<dyn CaptureSource>,
    sink: Box<dyn ImageSink>,
    interrupted: Arc<AtomicBool>,
}

impl Uploader {
    pub fn new(config: MasterConfig) -> Result<Self, ConfigError> {
        validate_master_config(&config)?;
        let sink = HttpUploader::new(&config.backend, &config.upload)?;
        debug!("Uploader targets {}", sink.upload_url());
        Ok(Self::from_parts(config, Box::new(sink)))
    }

    /// Same validation as [`Uploader::new`], with a caller-supplied upload target.
    pub fn with_sink(config: MasterConfig, sink: Box<dyn ImageSink>) -> Result<Self, ConfigError> {
        validate_master_config(&config)?;
        Ok(Self::from_parts(config, sink))
    }

    fn from_parts(config: MasterConfig, sink: Box<dyn ImageSink>) -> Self {
        Uploader {
            config,
            camera: Box::new(MockCamera::new()),
            sink,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_camera(mut self, camera: Box<dyn CaptureSource>) -> Self {
        self.replace_camera(camera);
        self
    }

    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    pub fn config(&self) -> &MasterConfig {
        &self.config
    }

    pub fn camera(&self) -> &dyn CaptureSource {
        self.camera.as_ref()
    }

    fn replace_camera(&mut self, camera: Box<dyn CaptureSource>) {
        self.release();
        self.camera = camera;
    }

    /// Detects the camera and keeps whichever source was selected.
    /// Returns true when a hardware camera is in use.
    pub fn initialize_camera(&mut self, force_mock: bool) -> bool {
        let source = CameraManager::initialize(&self.config.camera, force_mock);
        info!(
            "Capture source: {} ({})",
            source.get_name(),
            source.get_type()
        );
        self.replace_camera(source);
        self.camera.is_hardware()
    }

    fn check_interrupt(&self) -> Result<(), PipelineError> {
        if self.interrupted.load(Ordering::SeqCst) {
            warn!("🛑 Interrupt received, stopping before the next step.");
            return Err(PipelineError::Interrupted);
        }
        Ok(())
    }

    /// Captures one photo to `output_path`, or to a timestamped file in the
    /// capture directory when no path is given.
    pub fn capture_photo(&mut self, output_path: Option<&Path>) -> Result<PathBuf, CaptureError> {
        let target = match output_path {
            Some(path) => path.to_path_buf(),
            None => file_utils::default_capture_path(&self.config.app_settings.capture_directory()),
        };
        let capture_start = Instant::now();
        match self.camera.capture_image(&target) {
            Ok(path) => {
                debug!("Capture finished in {:?}", capture_start.elapsed());
                Ok(path)
            }
            Err(e) => {
                error!("❌ Failed to capture photo: {}", e);
                Err(e)
            }
        }
    }

    pub fn upload_photo(&self, image_path: &Path) -> Result<UploadReceipt, UploadError> {
        self.sink.upload(image_path)
    }

    /// One capture → upload → cleanup cycle using the default capture path.
    pub fn capture_and_upload(&mut self, cleanup: bool) -> Result<UploadReceipt, PipelineError> {
        self.capture_and_upload_to(None, cleanup)
    }

    /// A failed capture ends the cycle without an upload attempt. The local
    /// file is deleted only after a confirmed upload with `cleanup` set; a
    /// failed deletion is logged and does not change the outcome.
    pub fn capture_and_upload_to(
        &mut self,
        output_path: Option<&Path>,
        cleanup: bool,
    ) -> Result<UploadReceipt, PipelineError> {
        let cycle_start = Instant::now();
        self.check_interrupt()?;
        let image_path = self.capture_photo(output_path)?;

        self.check_interrupt()?;
        let receipt = self.upload_photo(&image_path)?;

        if cleanup {
            file_utils::remove_local_copy(&image_path);
        } else {
            info!("Keeping local file: {}", image_path.display());
        }
        debug!("Capture-and-upload cycle finished in {:?}", cycle_start.elapsed());
        Ok(receipt)
    }

    /// Stops the camera stream. Errors are logged, never returned.
    pub fn release(&mut self) {
        if let Err(e) = self.camera.release() {
            warn!("⚠️ Error stopping camera '{}': {}", self.camera.get_name(), e);
        }
    }
}

impl Drop for Uploader {
    fn drop(&mut self) {
        self.release();
    }
}
