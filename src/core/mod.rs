pub mod camera_manager;
pub mod capture_source;
