use async_trait::async_trait;
use std::time::Duration;
use voicetube_core::config::SearchParams;
use voicetube_core::text::preview_text;
use voicetube_core::types::{SearchRequest, VideoResult};
use voicetube_engine::error::ProviderError;
use voicetube_engine::traits::SearchProvider;
use voicetube_providers::parse::parse_youtube_search;
use voicetube_providers::runtime::{HttpTimeouts, execute};
use voicetube_providers::youtube::{YouTubeSearchConfig, build_youtube_search_request};

const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// YouTube Data API v3 search over HTTP.
#[derive(Clone)]
pub struct YouTubeSearchProvider {
    base_url: String,
    api_key: Option<String>,
    timeouts: HttpTimeouts,
}

impl std::fmt::Debug for YouTubeSearchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeSearchProvider")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl YouTubeSearchProvider {
    pub fn new(params: &SearchParams, api_key: Option<String>) -> Self {
        Self {
            base_url: params.base_url.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeouts: HttpTimeouts {
                connect: Duration::from_millis(params.connect_timeout_ms),
                total: Duration::from_millis(params.timeout_ms),
            },
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SearchProvider for YouTubeSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<VideoResult>, ProviderError> {
        // No key is an expected deployment state: skip the network entirely.
        let Some(api_key) = self.api_key.clone() else {
            return Err(ProviderError::Unavailable("YouTube API key not configured".into()));
        };

        let cfg = YouTubeSearchConfig {
            base_url: self.base_url.clone(),
            api_key,
        };
        let req = build_youtube_search_request(&cfg, request)
            .map_err(|e| ProviderError::InvalidRequest(format!("build search url: {e}")))?;

        let resp = execute(&req, self.timeouts).await.map_err(|e| {
            if e.is_build() {
                ProviderError::InvalidRequest(e.to_string())
            } else {
                ProviderError::Unavailable(e.to_string())
            }
        })?;

        if !resp.is_success() {
            let body = String::from_utf8_lossy(&resp.body);
            return Err(ProviderError::Unavailable(format!(
                "YouTube search failed (status {}): {}",
                resp.status,
                preview_text(&body, ERROR_BODY_PREVIEW_CHARS)
            )));
        }

        let results = parse_youtube_search(&resp.body)
            .map_err(|e| ProviderError::Unavailable(format!("{e:#}")))?;
        log::debug!(
            "youtube returned {} result(s) for {:?}",
            results.len(),
            request.query
        );
        Ok(results)
    }
}
