// ABOUTME: Post-deploy health probe settings.
// ABOUTME: Path, auth header and timeout for the single best-effort probe.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HealthSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
            api_key_header: default_api_key_header(),
            timeout: default_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/health".to_string()
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
