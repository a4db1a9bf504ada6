pub mod mock_device;
#[cfg(feature = "opencv-camera")]
pub mod opencv_device;
