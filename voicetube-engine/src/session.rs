use serde::{Deserialize, Serialize};
use voicetube_core::types::SearchOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Listening,
    Processing,
    Speaking,
}

impl Phase {
    // A stable string label for UI display.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Listening => "listening",
            Phase::Processing => "processing",
            Phase::Speaking => "speaking",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The single mutable aggregate. Lives as long as its state machine and is
/// reset, not reallocated, on every listening cycle.
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub(crate) phase: Phase,
    pub(crate) last_transcript: String,
    pub(crate) last_response_text: String,
    pub(crate) last_outcome: Option<SearchOutcome>,
    pub(crate) last_error: Option<String>,
}

impl Session {
    pub(crate) fn reset_for_listening(&mut self) {
        self.last_transcript.clear();
        self.last_response_text.clear();
        self.last_outcome = None;
        self.last_error = None;
    }
}

/// Read-only copy of the session for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub transcript: String,
    pub response_text: String,
    pub outcome: Option<SearchOutcome>,
    // Last capture failure; the UI only offers "try again".
    pub last_error: Option<String>,
    pub mic_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub capture: bool,
    pub output: bool,
}
