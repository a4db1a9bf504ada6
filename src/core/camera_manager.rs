use crate::app_config::CameraSettings;
use crate::camera::mock_device::MockCamera;
use crate::core::capture_source::CaptureSource;
use log::{debug, info};
use std::time::Instant;

/// Whether this build can drive a physical camera at all.
pub fn hardware_support_compiled() -> bool {
    cfg!(feature = "opencv-camera")
}

pub struct CameraManager;

impl CameraManager {
    /// Picks the capture source once at startup. Falls back to the mock
    /// camera when hardware support is missing, disabled, or fails to open.
    pub fn initialize(settings: &CameraSettings, force_mock: bool) -> Box<dyn CaptureSource> {
        debug!("🛠️ Selecting capture source...");
        let start_time = Instant::now();

        if force_mock {
            info!("Mock camera requested. Skipping hardware detection.");
            return Box::new(MockCamera::new());
        }
        if !hardware_support_compiled() {
            info!("Camera not available. Using mock mode.");
            return Box::new(MockCamera::new());
        }

        let source = Self::open_hardware(settings);
        debug!("Capture source selected in {:?}.", start_time.elapsed());
        source
    }

    #[cfg(feature = "opencv-camera")]
    fn open_hardware(settings: &CameraSettings) -> Box<dyn CaptureSource> {
        use crate::camera::opencv_device::OpenCvCamera;
        match OpenCvCamera::open(settings) {
            Ok(camera) => Box::new(camera),
            Err(e) => {
                log::error!("❌ Failed to initialize camera: {}. Falling back to mock mode.", e);
                Box::new(MockCamera::new())
            }
        }
    }

    #[cfg(not(feature = "opencv-camera"))]
    fn open_hardware(_settings: &CameraSettings) -> Box<dyn CaptureSource> {
        Box::new(MockCamera::new())
    }
}
