use serde::{Deserialize, Serialize};

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
}

impl VideoResult {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        channel_title: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            channel_title: channel_title.into(),
            thumbnail_url: thumbnail_url.into(),
        }
    }

    pub fn watch_url(&self) -> String {
        format!("{WATCH_URL_PREFIX}{}", self.id)
    }
}

/// Result of one search, live or synthesized.
///
/// `degraded` marks results produced by the local fallback generator rather
/// than the remote provider. Downstream consumers render both the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub results: Vec<VideoResult>,
    pub degraded: bool,
}

impl SearchOutcome {
    pub fn live(query: impl Into<String>, results: Vec<VideoResult>) -> Self {
        Self {
            query: query.into(),
            results,
            degraded: false,
        }
    }

    pub fn degraded(query: impl Into<String>) -> Self {
        let query = query.into();
        let results = crate::fallback::placeholder_results(&query);
        Self {
            query,
            results,
            degraded: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Everything a provider needs for one call, minus the credential.
///
/// The credential is owned by the provider implementation and never travels
/// with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub result_type: String,
    pub max_results: u32,
    pub region_code: String,
    pub relevance_language: String,
}
