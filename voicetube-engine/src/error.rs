use crate::session::Phase;
use thiserror::Error;

/// Failure reported by a [`SearchProvider`](crate::traits::SearchProvider).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Expected remote failure: transport, timeout, non-2xx, malformed
    /// payload, missing credential. Absorbed into a degraded outcome.
    #[error("search provider unavailable: {0}")]
    Unavailable(String),

    /// The request could not be constructed. A bug or a broken configuration,
    /// never a remote condition.
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// The only error `SearchOrchestrator::search` returns.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchFault {
    #[error("search request could not be built: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureRejected {
    #[error("session is busy ({0})")]
    Busy(Phase),
    #[error("already listening")]
    AlreadyListening,
    #[error("speech output is active")]
    SpeechActive,
    #[error("speech capture is not available")]
    Unavailable,
    #[error("speech capture failed to start: {0}")]
    Device(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid intent grammar: {0}")]
    Grammar(String),
}
