//! Application Configuration
//!
//! Configuration for report generation and the narrative providers.

use std::env;
use std::time::Duration;

/// Report application configuration
#[derive(Clone)]
pub struct ReportConfig {
    /// Gemini API root; writes the periodic reports
    pub gemini_base_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Cohere API root; writes the forensic analyses
    pub cohere_base_url: String,
    pub cohere_api_key: String,
    pub cohere_model: String,
    /// Total deadline for one narrative call
    pub narrative_timeout: Duration,
    /// Lifetime of a cached analysis
    pub analysis_cache_ttl: Duration,
    /// Interval of the global cache reset
    pub cache_sweep_interval: Duration,
    /// Deadline for each per-source read of a window
    pub source_fetch_timeout: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_api_key: String::new(),
            gemini_model: "gemini-pro".to_string(),
            cohere_base_url: "https://api.cohere.ai/v1".to_string(),
            cohere_api_key: String::new(),
            cohere_model: "command-xlarge".to_string(),
            narrative_timeout: Duration::from_secs(60),
            analysis_cache_ttl: Duration::from_secs(24 * 60 * 60),
            cache_sweep_interval: Duration::from_secs(24 * 60 * 60),
            source_fetch_timeout: Duration::from_secs(10),
        }
    }
}

fn secs_var(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}

impl ReportConfig {
    /// Read overrides from the environment, keeping defaults for unset keys
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            cohere_base_url: env::var("COHERE_BASE_URL").unwrap_or(defaults.cohere_base_url),
            cohere_api_key: env::var("COHERE_API_KEY").unwrap_or_default(),
            cohere_model: env::var("COHERE_MODEL").unwrap_or(defaults.cohere_model),
            narrative_timeout: secs_var("NARRATIVE_TIMEOUT_SECS")
                .unwrap_or(defaults.narrative_timeout),
            analysis_cache_ttl: secs_var("ANALYSIS_CACHE_TTL_SECS")
                .unwrap_or(defaults.analysis_cache_ttl),
            cache_sweep_interval: secs_var("CACHE_SWEEP_INTERVAL_SECS")
                .unwrap_or(defaults.cache_sweep_interval),
            source_fetch_timeout: secs_var("SOURCE_FETCH_TIMEOUT_SECS")
                .unwrap_or(defaults.source_fetch_timeout),
        }
    }

    pub fn settings(&self) -> ReportSettings {
        ReportSettings {
            source_timeout: self.source_fetch_timeout,
            analysis_ttl: self.analysis_cache_ttl,
        }
    }
}

// API keys never reach the logs.
impl std::fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportConfig")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("cohere_base_url", &self.cohere_base_url)
            .field("cohere_model", &self.cohere_model)
            .field("analysis_cache_ttl", &self.analysis_cache_ttl)
            .field("source_fetch_timeout", &self.source_fetch_timeout)
            .finish_non_exhaustive()
    }
}

/// Runtime knobs the report handlers need
#[derive(Debug, Clone, Copy)]
pub struct ReportSettings {
    pub source_timeout: Duration,
    pub analysis_ttl: Duration,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportConfig::default().settings()
    }
}
