use crate::request::HttpRequest;
use voicetube_core::types::SearchRequest;

#[derive(Clone, PartialEq, Eq)]
pub struct YouTubeSearchConfig {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for YouTubeSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeSearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Builds a Data API v3 `search.list` call.
pub fn build_youtube_search_request(
    cfg: &YouTubeSearchConfig,
    req: &SearchRequest,
) -> Result<HttpRequest, url::ParseError> {
    let mut url = url::Url::parse(&join_url(&cfg.base_url, "/search"))?;
    url.query_pairs_mut()
        .append_pair("part", "snippet")
        .append_pair("q", &req.query)
        .append_pair("type", &req.result_type)
        .append_pair("maxResults", &req.max_results.to_string())
        .append_pair("key", &cfg.api_key)
        .append_pair("regionCode", &req.region_code)
        .append_pair("relevanceLanguage", &req.relevance_language);

    Ok(HttpRequest::get(url.to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
