use crate::error::{ProviderError, SearchFault};
use crate::traits::SearchProvider;
use std::sync::Arc;
use std::time::Duration;
use voicetube_core::config::SearchParams;
use voicetube_core::text::preview_text;
use voicetube_core::types::SearchOutcome;

// Slack on top of the HTTP timeouts before the orchestrator gives up itself.
const DEADLINE_GRACE: Duration = Duration::from_secs(2);

/// Issues exactly one provider call per search and degrades to placeholder
/// results when the provider can't deliver.
pub struct SearchOrchestrator {
    provider: Arc<dyn SearchProvider>,
    params: SearchParams,
    deadline: Duration,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn SearchProvider>, params: SearchParams) -> Self {
        let deadline = Duration::from_millis(params.connect_timeout_ms)
            + Duration::from_millis(params.timeout_ms)
            + DEADLINE_GRACE;
        Self {
            provider,
            params,
            deadline,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Never fails because of the remote side. `Err` only reports a request
    /// that could not be built at all.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, SearchFault> {
        let request = self.params.request_for(query);
        log::debug!("searching for {:?}", preview_text(query, 64));

        let outcome = tokio::time::timeout(self.deadline, self.provider.search(&request)).await;

        match outcome {
            Ok(Ok(mut results)) => {
                results.truncate(self.params.max_results as usize);
                log::info!("search returned {} results", results.len());
                Ok(SearchOutcome::live(query, results))
            }
            Ok(Err(ProviderError::Unavailable(reason))) => {
                log::warn!("search provider failed, using fallback results: {reason}");
                Ok(SearchOutcome::degraded(query))
            }
            Ok(Err(ProviderError::InvalidRequest(reason))) => {
                log::error!("search request could not be built: {reason}");
                Err(SearchFault::InvalidRequest(reason))
            }
            Err(_) => {
                log::warn!(
                    "search provider exceeded {}ms, using fallback results",
                    self.deadline.as_millis()
                );
                Ok(SearchOutcome::degraded(query))
            }
        }
    }
}
