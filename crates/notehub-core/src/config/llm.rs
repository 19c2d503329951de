//! LLM proxy admin API configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the LiteLLM-compatible proxy that meters model access.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LlmProxyConfig {
    /// Base URL of the proxy admin API.
    #[serde(default = "default_base_url")]
    #[validate(url)]
    pub base_url: String,
    /// Master key used to mint and manage per-user virtual keys.
    #[serde(default, skip_serializing)]
    pub master_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_seconds: u64,
}

impl Default for LlmProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            master_key: None,
            request_timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://litellm:4000".to_string()
}

fn default_timeout() -> u64 {
    30
}
