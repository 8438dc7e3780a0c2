use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Where skills are posted: `{base_url}{path}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_endpoint_path")]
    pub path: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".into()
}

fn default_endpoint_path() -> String {
    "/api/skills".into()
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_endpoint_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TOML file of `[[skills]]`; the built-in catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub assign_order: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SubmitConfig {
    #[serde(default = "default_fail_on_error")]
    pub fail_on_error: bool,
}

fn default_fail_on_error() -> bool {
    true
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            fail_on_error: default_fail_on_error(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_seconds: u64,
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_seconds: default_connect_timeout(),
            request_seconds: default_request_timeout(),
        }
    }
}
