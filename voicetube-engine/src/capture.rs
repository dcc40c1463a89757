use crate::error::CaptureRejected;
use crate::events::{CaptureId, CaptureSink, SessionEvent};
use crate::traits::{CaptureRequest, SpeechRecognizer};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Single-shot listening: one `start` yields at most one accepted transcript
/// or error, after which the controller is no longer listening.
pub struct SpeechCaptureController {
    device: Arc<dyn SpeechRecognizer>,
    language: String,
    events: UnboundedSender<SessionEvent>,
    next_capture: CaptureId,
    current: Option<CaptureId>,
}

impl SpeechCaptureController {
    pub fn new(
        device: Arc<dyn SpeechRecognizer>,
        language: impl Into<String>,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            device,
            language: language.into(),
            events,
            next_capture: 1,
            current: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.device.is_available()
    }

    pub fn is_listening(&self) -> bool {
        self.current.is_some()
    }

    /// `speech_active` must reflect the output controller: capturing while
    /// the system itself speaks would transcribe its own voice.
    pub fn start(&mut self, speech_active: bool) -> Result<CaptureId, CaptureRejected> {
        if self.current.is_some() {
            return Err(CaptureRejected::AlreadyListening);
        }
        if speech_active {
            return Err(CaptureRejected::SpeechActive);
        }
        if !self.device.is_available() {
            return Err(CaptureRejected::Unavailable);
        }

        let id = self.next_capture;
        self.next_capture = self.next_capture.wrapping_add(1);

        let request = CaptureRequest {
            language: self.language.clone(),
        };
        self.current = Some(id);
        if let Err(e) = self
            .device
            .start(&request, CaptureSink::new(id, self.events.clone()))
        {
            self.current = None;
            return Err(CaptureRejected::Device(e.to_string()));
        }
        Ok(id)
    }

    /// Returns whether a capture was actually stopped.
    pub fn stop(&mut self) -> bool {
        if self.current.take().is_some() {
            self.device.stop();
            true
        } else {
            false
        }
    }

    pub fn on_transcript(&mut self, capture: CaptureId) -> bool {
        self.settle(capture, "transcript")
    }

    pub fn on_error(&mut self, capture: CaptureId) -> bool {
        self.settle(capture, "error")
    }

    pub fn on_ended(&mut self, capture: CaptureId) -> bool {
        self.settle(capture, "end")
    }

    fn settle(&mut self, capture: CaptureId, what: &str) -> bool {
        if self.current == Some(capture) {
            self.current = None;
            true
        } else {
            log::debug!("dropping stale capture {what} for capture {capture}");
            false
        }
    }
}
