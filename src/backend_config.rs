use serde::Deserialize;

pub const PLACEHOLDER_BASE_URL: &str = "https://your-app.com";
pub const PLACEHOLDER_PROJECT_ID: &str = "your-project-id-here";
pub const PLACEHOLDER_ORG_ID: &str = "your-org-id-here";
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Path segment of the ingestion endpoint for hardware devices.
pub const HARDWARE_IMAGES_PATH: &str = "/api/hardware/images";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AuthScheme {
    #[default]
    XApiKey,
    Bearer,
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub project_id: String,
    pub organization_id: String,
    pub api_key: String,
    pub auth_scheme: AuthScheme,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: PLACEHOLDER_BASE_URL.to_string(),
            project_id: PLACEHOLDER_PROJECT_ID.to_string(),
            organization_id: PLACEHOLDER_ORG_ID.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            auth_scheme: AuthScheme::XApiKey,
        }
    }
}

impl BackendConfig {
    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), HARDWARE_IMAGES_PATH)
    }
}

// Keep the API key out of debug logs.
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("organization_id", &self.organization_id)
            .field("api_key", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}
