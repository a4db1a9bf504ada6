use crate::app_config::UploadSettings;
use crate::backend_config::{AuthScheme, BackendConfig};
use crate::common::{file_utils, timestamp_utils};
use crate::errors::{ConfigError, UploadError};
use log::{debug, error, info};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderName};
use reqwest::StatusCode;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Header carrying the static device key (sent as `X-API-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";

/// What the backend reported about a stored image. Every field is optional;
/// a 201 without them still counts as success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    pub image_id: Option<String>,
    pub public_url: Option<String>,
    pub message: Option<String>,
}

impl UploadReceipt {
    pub fn from_response(body: &Value) -> Self {
        UploadReceipt {
            image_id: body.pointer("/image/id").and_then(value_as_string),
            public_url: body.pointer("/image/public_url").and_then(value_as_string),
            message: body.get("message").and_then(value_as_string),
        }
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Destination for captured images.
pub trait ImageSink: Send {
    fn upload(&self, image_path: &Path) -> Result<UploadReceipt, UploadError>;
}

/// Posts images to the backend's hardware ingestion endpoint.
pub struct HttpUploader {
    client: Client,
    backend: BackendConfig,
    settings: UploadSettings,
}

impl HttpUploader {
    pub fn new(backend: &BackendConfig, settings: &UploadSettings) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            backend: backend.clone(),
            settings: settings.clone(),
        })
    }

    pub fn upload_url(&self) -> String {
        self.backend.upload_url()
    }

    fn auth_header(&self) -> (HeaderName, String) {
        match self.backend.auth_scheme {
            AuthScheme::XApiKey => (
                HeaderName::from_static(API_KEY_HEADER),
                self.backend.api_key.clone(),
            ),
            AuthScheme::Bearer => (AUTHORIZATION, format!("Bearer {}", self.backend.api_key)),
        }
    }

    fn build_form(&self, image_path: &Path, description: &str) -> Result<Form, UploadError> {
        let bytes = fs::read(image_path)?;
        let file_part = Part::bytes(bytes)
            .file_name(file_utils::file_name_of(image_path))
            .mime_str("image/jpeg")?;

        Ok(Form::new()
            .part("file", file_part)
            .text("projectId", self.backend.project_id.clone())
            .text("organizationId", self.backend.organization_id.clone())
            .text("folderName", self.settings.folder_name.clone())
            .text("description", description.to_string()))
    }

    fn send(&self, image_path: &Path) -> Result<UploadReceipt, UploadError> {
        if !image_path.exists() {
            return Err(UploadError::FileNotFound(image_path.display().to_string()));
        }

        let upload_url = self.upload_url();
        let timestamp =
            timestamp_utils::current_local_timestamp_str(timestamp_utils::DESCRIPTION_TIMESTAMP_FORMAT);
        let description =
            timestamp_utils::build_description(&self.settings.description_prefix, &timestamp);
        let form = self.build_form(image_path, &description)?;

        info!("📤 Uploading photo to {}...", upload_url);
        info!("  Project ID: {}", self.backend.project_id);
        info!("  Organization ID: {}", self.backend.organization_id);
        info!("  Folder: {}", self.settings.folder_name);
        info!("  Description: {}", description);

        let (header_name, header_value) = self.auth_header();
        let send_start = Instant::now();
        let response = self
            .client
            .post(&upload_url)
            .header(header_name, header_value)
            .multipart(form)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        debug!("Backend answered {} in {:?}", status, send_start.elapsed());

        if status != StatusCode::CREATED {
            return Err(UploadError::Rejected { status, body });
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            UploadError::InvalidResponse(format!("201 body is not JSON ({}): {}", e, body))
        })?;
        Ok(UploadReceipt::from_response(&parsed))
    }
}

impl ImageSink for HttpUploader {
    fn upload(&self, image_path: &Path) -> Result<UploadReceipt, UploadError> {
        match self.send(image_path) {
            Ok(receipt) => {
                info!("✅ Photo uploaded successfully!");
                info!("  Image ID: {}", receipt.image_id.as_deref().unwrap_or("N/A"));
                info!("  Public URL: {}", receipt.public_url.as_deref().unwrap_or("N/A"));
                if let Some(message) = &receipt.message {
                    debug!("  Backend message: {}", message);
                }
                Ok(receipt)
            }
            Err(UploadError::Rejected { status, body }) => {
                error!("❌ Upload failed with status {}", status.as_u16());
                error!("  Response: {}", body);
                if let Some(reason) = backend_error_message(&body) {
                    error!("  Reason: {}", reason);
                }
                if status == StatusCode::UNAUTHORIZED {
                    error!("  Check that the API key matches HARDWARE_API_KEY on the backend.");
                }
                Err(UploadError::Rejected { status, body })
            }
            Err(e) => {
                error!("❌ {}", e);
                Err(e)
            }
        }
    }
}

/// Extracts `{"error": "..."}` from a backend failure body, if present.
pub fn backend_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}
