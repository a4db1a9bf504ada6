use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    pub log_level: Option<String>, // CLI --debug takes precedence
    pub output_directory: Option<String>, // None = OS temp dir
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            log_level: Some("info".to_string()),
            output_directory: None,
        }
    }
}

impl ApplicationConfig {
    pub fn capture_directory(&self) -> PathBuf {
        match &self.output_directory {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => std::env::temp_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadSettings {
    pub folder_name: String,
    pub description_prefix: String,
    pub timeout_secs: u64,
    pub cleanup: bool, // delete the local copy after a confirmed upload
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            folder_name: "Raspberry Pi Photos".to_string(),
            description_prefix: "RPi Capture".to_string(),
            timeout_secs: 30,
            cleanup: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub jpeg_quality: u8, // 1-100
    pub device_index: i32,
    pub warmup_secs: u64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            width: 1920,
            height: 1080,
            jpeg_quality: 85,
            device_index: 0,
            warmup_secs: 2,
        }
    }
}
