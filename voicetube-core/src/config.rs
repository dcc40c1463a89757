use crate::types::SearchRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_RESULTS_LIMIT: u32 = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_results must be between 1 and {MAX_RESULTS_LIMIT}, got {0}")]
    MaxResults(u32),
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("result_type must not be empty")]
    EmptyResultType,
    #[error("base_url must start with http:// or https://, got {0:?}")]
    BaseUrl(String),
    #[error("{0} must be a positive number")]
    SpeechParameter(&'static str),
}

/// Fixed parameters of every provider request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub base_url: String,
    pub result_type: String,
    pub max_results: u32,
    pub region_code: String,
    pub relevance_language: String,
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".into(),
            result_type: "video".into(),
            max_results: 12,
            region_code: "BR".into(),
            relevance_language: "pt".into(),
            connect_timeout_ms: 5_000,
            timeout_ms: 10_000,
        }
    }
}

impl SearchParams {
    pub fn request_for(&self, query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            result_type: self.result_type.clone(),
            max_results: self.max_results,
            region_code: self.region_code.clone(),
            relevance_language: self.relevance_language.clone(),
        }
    }
}

/// Parameters handed to the speech devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// BCP-47 tag used for both recognition and synthesis.
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: "pt-BR".into(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchParams,
    #[serde(default)]
    pub voice: VoiceSettings,

    // Secrets are stored outside this struct at rest.
    #[serde(default)]
    pub api_key_present: bool,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.search;
        if s.max_results == 0 || s.max_results > MAX_RESULTS_LIMIT {
            return Err(ConfigError::MaxResults(s.max_results));
        }
        if s.connect_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("connect_timeout_ms"));
        }
        if s.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("timeout_ms"));
        }
        if s.result_type.trim().is_empty() {
            return Err(ConfigError::EmptyResultType);
        }
        if !(s.base_url.starts_with("http://") || s.base_url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(s.base_url.clone()));
        }

        let v = &self.voice;
        if !(v.rate.is_finite() && v.rate > 0.0) {
            return Err(ConfigError::SpeechParameter("rate"));
        }
        if !(v.pitch.is_finite() && v.pitch > 0.0) {
            return Err(ConfigError::SpeechParameter("pitch"));
        }
        Ok(())
    }
}
