use crate::youtube::YouTubeSearchProvider;
use anyhow::Context;
use std::sync::Arc;
use voicetube_core::config::AppConfig;
use voicetube_engine::machine::{SessionConfig, SessionStateMachine};
use voicetube_engine::traits::{SpeechRecognizer, SpeechSynthesizer};

/// Wires the HTTP search provider and the given speech devices into a session.
///
/// `api_key` is usually [`crate::secrets::resolve_youtube_api_key`]; `None`
/// keeps the session working on placeholder results.
pub fn build_state_machine_from_config(
    cfg: &AppConfig,
    api_key: Option<String>,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
) -> anyhow::Result<SessionStateMachine> {
    cfg.validate().context("invalid config")?;

    if api_key.is_none() {
        if cfg.api_key_present {
            log::warn!("config says a YouTube API key is stored, but none was found");
        } else {
            log::info!("no YouTube API key; searches will return placeholder results");
        }
    }

    let provider = YouTubeSearchProvider::new(&cfg.search, api_key);
    SessionStateMachine::new(
        SessionConfig::from(cfg),
        recognizer,
        synthesizer,
        Arc::new(provider),
    )
    .context("build session")
}
