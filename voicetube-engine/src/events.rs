use tokio::sync::mpsc::UnboundedSender;

pub type CaptureId = u64;
pub type UtteranceId = u64;

/// Device notifications, delivered to the state machine in arrival order.
///
/// Every event names the capture or utterance it belongs to so the state
/// machine can drop notifications from a superseded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Transcript { capture: CaptureId, text: String },
    CaptureError { capture: CaptureId, reason: String },
    /// The device stopped without a result or error (e.g. silence, stop()).
    CaptureEnded { capture: CaptureId },
    SpeechFinished { utterance: UtteranceId },
}

/// Handed to a recognizer for one capture.
#[derive(Debug, Clone)]
pub struct CaptureSink {
    capture: CaptureId,
    tx: UnboundedSender<SessionEvent>,
}

impl CaptureSink {
    pub fn new(capture: CaptureId, tx: UnboundedSender<SessionEvent>) -> Self {
        Self { capture, tx }
    }

    pub fn id(&self) -> CaptureId {
        self.capture
    }

    pub fn transcript(&self, text: impl Into<String>) {
        self.send(SessionEvent::Transcript {
            capture: self.capture,
            text: text.into(),
        });
    }

    pub fn error(&self, reason: impl Into<String>) {
        self.send(SessionEvent::CaptureError {
            capture: self.capture,
            reason: reason.into(),
        });
    }

    pub fn ended(&self) {
        self.send(SessionEvent::CaptureEnded {
            capture: self.capture,
        });
    }

    fn send(&self, event: SessionEvent) {
        // The state machine is gone; nobody is left to care.
        let _ = self.tx.send(event);
    }
}

/// Handed to a synthesizer for one utterance.
#[derive(Debug, Clone)]
pub struct SpeechSink {
    utterance: UtteranceId,
    tx: UnboundedSender<SessionEvent>,
}

impl SpeechSink {
    pub fn new(utterance: UtteranceId, tx: UnboundedSender<SessionEvent>) -> Self {
        Self { utterance, tx }
    }

    pub fn id(&self) -> UtteranceId {
        self.utterance
    }

    pub fn finished(&self) {
        let _ = self.tx.send(SessionEvent::SpeechFinished {
            utterance: self.utterance,
        });
    }
}
