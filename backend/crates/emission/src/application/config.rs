//! Application Configuration
//!
//! Configuration for the emission calculation providers.

use std::env;
use std::time::Duration;

/// Emission application configuration
#[derive(Clone)]
pub struct EmissionConfig {
    /// CarbonKit API root (category calculations)
    pub carbonkit_base_url: String,
    /// CarbonKit HTTP Basic credentials
    pub carbonkit_username: String,
    pub carbonkit_password: String,
    /// Carbon Interface API root (shipping estimates)
    pub carbon_interface_base_url: String,
    /// Carbon Interface bearer token
    pub carbon_interface_api_key: String,
    /// Total deadline for one provider call
    pub upstream_timeout: Duration,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self {
            carbonkit_base_url: "https://api.carbonkit.net/3.6".to_string(),
            carbonkit_username: String::new(),
            carbonkit_password: String::new(),
            carbon_interface_base_url: "https://www.carboninterface.com/api/v1".to_string(),
            carbon_interface_api_key: String::new(),
            upstream_timeout: Duration::from_secs(15),
        }
    }
}

impl EmissionConfig {
    /// Read overrides from the environment, keeping defaults for unset keys
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            carbonkit_base_url: env::var("CARBONKIT_BASE_URL")
                .unwrap_or(defaults.carbonkit_base_url),
            carbonkit_username: env::var("CARBONKIT_USERNAME").unwrap_or_default(),
            carbonkit_password: env::var("CARBONKIT_PASSWORD").unwrap_or_default(),
            carbon_interface_base_url: env::var("CARBON_INTERFACE_BASE_URL")
                .unwrap_or(defaults.carbon_interface_base_url),
            carbon_interface_api_key: env::var("CARBON_INTERFACE_API_KEY").unwrap_or_default(),
            upstream_timeout: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
        }
    }

    /// Whether provider credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.carbonkit_username.is_empty() && !self.carbon_interface_api_key.is_empty()
    }
}

// Credentials never reach the logs.
impl std::fmt::Debug for EmissionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmissionConfig")
            .field("carbonkit_base_url", &self.carbonkit_base_url)
            .field("carbon_interface_base_url", &self.carbon_interface_base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish_non_exhaustive()
    }
}
