use crate::app_config::{ApplicationConfig, CameraSettings, UploadSettings};
use crate::backend_config::{
    BackendConfig, PLACEHOLDER_API_KEY, PLACEHOLDER_BASE_URL, PLACEHOLDER_ORG_ID,
    PLACEHOLDER_PROJECT_ID,
};
use crate::errors::ConfigError;
use log::{debug, info};
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

pub const DEFAULT_CONFIG_PATH: &str = "config/uploader.yaml";

pub const ENV_API_URL: &str = "HARDWARE_API_URL";
pub const ENV_PROJECT_ID: &str = "HARDWARE_PROJECT_ID";
pub const ENV_ORG_ID: &str = "HARDWARE_ORG_ID";
pub const ENV_API_KEY: &str = "HARDWARE_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MasterConfig {
    #[serde(rename = "application")]
    pub app_settings: ApplicationConfig,
    pub backend: BackendConfig,
    pub upload: UploadSettings,
    pub camera: CameraSettings,
}

/// Loads the configuration file and applies environment overrides.
///
/// A missing file is only an error when `required` is set (the user passed
/// `--config` explicitly); otherwise built-in defaults are used. Validation
/// is left to [`validate_master_config`], which the uploader runs on
/// construction.
pub fn load_config(path: &str, required: bool) -> Result<MasterConfig, ConfigError> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let mut config = if Path::new(path).exists() || required {
        let config_str = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        parse_config(&config_str, path)?
    } else {
        debug!("No configuration file at '{}', using built-in defaults.", path);
        MasterConfig::default()
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    info!("✅ Configuration loaded from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

pub fn parse_config(config_str: &str, origin: &str) -> Result<MasterConfig, ConfigError> {
    // An empty file deserializes to unit, not to a mapping.
    if config_str.trim().is_empty() {
        return Ok(MasterConfig::default());
    }
    serde_yaml::from_str(config_str).map_err(|e| ConfigError::Parse {
        path: origin.to_string(),
        details: e.to_string(),
    })
}

/// Overrides backend values from the environment. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut MasterConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let backend = &mut config.backend;
    let targets: [(&str, &mut String); 4] = [
        (ENV_API_URL, &mut backend.base_url),
        (ENV_PROJECT_ID, &mut backend.project_id),
        (ENV_ORG_ID, &mut backend.organization_id),
        (ENV_API_KEY, &mut backend.api_key),
    ];
    for (key, slot) in targets {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
            debug!("Using {} from the environment.", key);
            *slot = value;
        }
    }
}

pub fn validate_master_config(config: &MasterConfig) -> Result<(), ConfigError> {
    debug!("🕵️ Validating configuration...");
    let backend = &config.backend;

    let base_url = require("base URL", &backend.base_url, PLACEHOLDER_BASE_URL)?;
    let parsed = Url::parse(base_url).map_err(|e| ConfigError::Invalid {
        field: "base URL",
        details: format!("'{}' is not a valid URL: {}", base_url, e),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::Invalid {
            field: "base URL",
            details: format!("'{}' must be an absolute http(s) URL", base_url),
        });
    }

    let project_id = require("project ID", &backend.project_id, PLACEHOLDER_PROJECT_ID)?;
    require_uuid("project ID", project_id)?;

    let org_id = require("organization ID", &backend.organization_id, PLACEHOLDER_ORG_ID)?;
    require_uuid("organization ID", org_id)?;

    let api_key = require("API key", &backend.api_key, PLACEHOLDER_API_KEY)?;
    if HeaderValue::from_str(api_key).is_err() {
        return Err(ConfigError::Invalid {
            field: "API key",
            details: "contains characters that are not allowed in an HTTP header".to_string(),
        });
    }

    let camera = &config.camera;
    if camera.width == 0 || camera.height == 0 {
        return Err(ConfigError::Invalid {
            field: "image dimensions",
            details: format!("{}x{} must be non-zero", camera.width, camera.height),
        });
    }
    if !(1..=100).contains(&camera.jpeg_quality) {
        return Err(ConfigError::Invalid {
            field: "JPEG quality",
            details: format!("{} is outside 1-100", camera.jpeg_quality),
        });
    }
    if config.upload.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            field: "upload timeout",
            details: "must be at least one second".to_string(),
        });
    }

    info!("👍 Configuration validated.");
    Ok(())
}

fn require<'a>(
    field: &'static str,
    value: &'a str,
    placeholder: &str,
) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing { field });
    }
    if trimmed == placeholder {
        return Err(ConfigError::Placeholder {
            field,
            value: placeholder.to_string(),
        });
    }
    Ok(value)
}

fn require_uuid(field: &'static str, value: &str) -> Result<(), ConfigError> {
    Uuid::parse_str(value).map(|_| ()).map_err(|e| ConfigError::Invalid {
        field,
        details: format!(
            "expected a UUID (e.g. 123e4567-e89b-12d3-a456-426614174000), got '{}': {}",
            value, e
        ),
    })
}
