use crate::error::ProviderError;
use crate::events::{CaptureSink, SpeechSink};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use voicetube_core::types::{SearchRequest, VideoResult};

/// One single-shot, final-results-only recognition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<VideoResult>, ProviderError>;
}

/// Speech-to-text device.
///
/// `start` returns once the device is listening; the outcome arrives later
/// through `sink` (at most one transcript or one error, then optionally
/// `ended`).
pub trait SpeechRecognizer: Send + Sync {
    fn is_available(&self) -> bool;
    fn start(&self, request: &CaptureRequest, sink: CaptureSink) -> anyhow::Result<()>;
    fn stop(&self);
}

/// Text-to-speech device.
///
/// `speak` returns once playback has started; natural completion is reported
/// through `sink`. Whether a cancelled utterance reports completion is up to
/// the device.
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool;
    fn speak(&self, request: &SpeechRequest, sink: SpeechSink) -> anyhow::Result<()>;
    fn cancel(&self);
}
