use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration Error: {field} is not set. Please update {field} in the configuration")]
    Missing { field: &'static str },

    #[error("Configuration Error: {field} still has its placeholder value '{value}'. Please update {field} in the configuration")]
    Placeholder { field: &'static str, value: String },

    #[error("Configuration Error: {field} is invalid: {details}")]
    Invalid { field: &'static str, details: String },

    #[error("Configuration Error: failed to read '{path}': {details}")]
    Read { path: String, details: String },

    #[error("Configuration Error: failed to parse '{path}': {details}")]
    Parse { path: String, details: String },

    #[error("Configuration Error: failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Camera Error: {0}")]
    Camera(String),

    #[error("File I/O Error: {0}")]
    Io(String),

    #[error("Capture interrupted")]
    Interrupted,
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Io(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Image file not found: {0}")]
    FileNotFound(String),

    #[error("File I/O Error: {0}")]
    Io(String),

    #[error("Network error during upload: {0}")]
    Network(String),

    #[error("Upload timed out: {0}")]
    Timeout(String),

    #[error("Upload failed with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Unexpected response from backend: {0}")]
    InvalidResponse(String),
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UploadError::Timeout(err.to_string())
        } else if err.is_decode() {
            UploadError::InvalidResponse(err.to_string())
        } else {
            UploadError::Network(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Interrupted by user")]
    Interrupted,
}
