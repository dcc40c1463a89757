use crate::events::{SessionEvent, SpeechSink, UtteranceId};
use crate::traits::{SpeechRequest, SpeechSynthesizer};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use voicetube_core::config::VoiceSettings;

/// Serializes spoken replies: at most one utterance is active, and a new one
/// interrupts the previous instead of queuing behind it.
pub struct SpeechOutputController {
    device: Arc<dyn SpeechSynthesizer>,
    voice: VoiceSettings,
    events: UnboundedSender<SessionEvent>,
    next_utterance: UtteranceId,
    current: Option<UtteranceId>,
}

impl SpeechOutputController {
    pub fn new(
        device: Arc<dyn SpeechSynthesizer>,
        voice: VoiceSettings,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            device,
            voice,
            events,
            next_utterance: 1,
            current: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.device.is_available()
    }

    pub fn is_speaking(&self) -> bool {
        self.current.is_some()
    }

    /// Starts speaking `text`, interrupting any active utterance.
    ///
    /// Returns the utterance id whose `SpeechFinished` will be honored, or
    /// `None` when nothing is playing (device absent or refused).
    pub fn speak(&mut self, text: &str) -> Option<UtteranceId> {
        if self.current.take().is_some() {
            self.device.cancel();
        }

        if !self.device.is_available() {
            log::debug!("speech output unavailable; reply not spoken");
            return None;
        }

        let id = self.next_utterance;
        self.next_utterance = self.next_utterance.wrapping_add(1);

        let request = SpeechRequest {
            text: text.to_string(),
            language: self.voice.language.clone(),
            rate: self.voice.rate,
            pitch: self.voice.pitch,
        };

        // Mark active before the device can report completion.
        self.current = Some(id);
        if let Err(e) = self
            .device
            .speak(&request, SpeechSink::new(id, self.events.clone()))
        {
            log::warn!("speech output failed: {e}");
            self.current = None;
            return None;
        }
        Some(id)
    }

    /// Accepts a completion only for the active utterance.
    pub fn on_finished(&mut self, utterance: UtteranceId) -> bool {
        if self.current == Some(utterance) {
            self.current = None;
            true
        } else {
            log::debug!("dropping stale speech completion {utterance}");
            false
        }
    }
}
