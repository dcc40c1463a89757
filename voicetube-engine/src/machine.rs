use crate::capture::SpeechCaptureController;
use crate::error::{CaptureRejected, EngineError};
use crate::events::SessionEvent;
use crate::output::SpeechOutputController;
use crate::search::SearchOrchestrator;
use crate::session::{Capabilities, Phase, Session, SessionSnapshot};
use crate::traits::{SearchProvider, SpeechRecognizer, SpeechSynthesizer};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use voicetube_core::config::{AppConfig, SearchParams, VoiceSettings};
use voicetube_core::intent::{Intent, IntentClassifier, IntentGrammar};
use voicetube_core::response::{
    missing_query_message, outcome_message, search_fault_message, searching_message,
    unrecognized_message,
};
use voicetube_core::text::preview_text;

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub search: SearchParams,
    pub voice: VoiceSettings,
    pub grammar: IntentGrammar,
}

impl From<&AppConfig> for SessionConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            search: cfg.search.clone(),
            voice: cfg.voice.clone(),
            grammar: IntentGrammar::default(),
        }
    }
}

/// Owns the session and drives Idle -> Listening -> Processing -> Speaking -> Idle.
///
/// Device callbacks arrive as [`SessionEvent`]s and are applied one at a time
/// through [`handle_event`](Self::handle_event); each is checked against the
/// current phase and ticket before it can change anything.
pub struct SessionStateMachine {
    session: Session,
    classifier: IntentClassifier,
    search: SearchOrchestrator,
    capture: SpeechCaptureController,
    output: SpeechOutputController,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionStateMachine {
    pub fn new(
        cfg: SessionConfig,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        provider: Arc<dyn SearchProvider>,
    ) -> Result<Self, EngineError> {
        let classifier =
            IntentClassifier::new(cfg.grammar).map_err(|e| EngineError::Grammar(e.to_string()))?;
        Ok(Self::with_orchestrator(
            classifier,
            SearchOrchestrator::new(provider, cfg.search),
            cfg.voice,
            recognizer,
            synthesizer,
        ))
    }

    pub fn with_orchestrator(
        classifier: IntentClassifier,
        search: SearchOrchestrator,
        voice: VoiceSettings,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let capture = SpeechCaptureController::new(recognizer, voice.language.clone(), tx.clone());
        let output = SpeechOutputController::new(synthesizer, voice, tx);
        let (snapshots, _) = watch::channel(SessionSnapshot::default());

        let mut machine = Self {
            session: Session::default(),
            classifier,
            search,
            capture,
            output,
            events: rx,
            snapshots,
        };
        machine.publish();
        machine
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            capture: self.capture.is_available(),
            output: self.output.is_available(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.session.phase,
            transcript: self.session.last_transcript.clone(),
            response_text: self.session.last_response_text.clone(),
            outcome: self.session.last_outcome.clone(),
            last_error: self.session.last_error.clone(),
            mic_enabled: self.capture.is_available()
                && !self.output.is_speaking()
                && matches!(self.session.phase, Phase::Idle | Phase::Listening),
        }
    }

    /// Receives a fresh snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn start_listening(&mut self) -> Result<(), CaptureRejected> {
        if self.session.phase != Phase::Idle {
            return Err(CaptureRejected::Busy(self.session.phase));
        }

        match self.capture.start(self.output.is_speaking()) {
            Ok(_) => {
                self.session.reset_for_listening();
                self.transition(Phase::Listening);
                Ok(())
            }
            Err(e) => {
                if let CaptureRejected::Device(reason) = &e {
                    log::warn!("speech capture failed to start: {reason}");
                    self.session.last_error = Some(reason.clone());
                    self.publish();
                }
                Err(e)
            }
        }
    }

    /// Returns whether a capture was running.
    pub fn stop_listening(&mut self) -> bool {
        if self.session.phase != Phase::Listening {
            return false;
        }
        self.capture.stop();
        self.transition(Phase::Idle);
        true
    }

    /// The single microphone button: stop if listening, otherwise start.
    pub fn toggle_listening(&mut self) -> Result<Phase, CaptureRejected> {
        if self.session.phase == Phase::Listening {
            self.stop_listening();
        } else {
            self.start_listening()?;
        }
        Ok(self.session.phase)
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Drains events that are already queued without waiting.
    pub async fn handle_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            if self.handle_event(event).await {
                applied += 1;
            }
        }
        applied
    }

    /// Starts listening and processes events until the session is idle again.
    pub async fn run_cycle(&mut self) -> Result<SessionSnapshot, CaptureRejected> {
        self.start_listening()?;
        while self.session.phase != Phase::Idle {
            let Some(event) = self.next_event().await else {
                break;
            };
            self.handle_event(event).await;
        }
        Ok(self.snapshot())
    }

    /// Applies one event. Returns `false` if it was stale and dropped.
    pub async fn handle_event(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Transcript { capture, text } => {
                if self.session.phase != Phase::Listening || !self.capture.on_transcript(capture) {
                    log::debug!("ignoring transcript in phase {}", self.session.phase);
                    return false;
                }
                self.process_transcript(text).await;
                true
            }
            SessionEvent::CaptureError { capture, reason } => {
                if self.session.phase != Phase::Listening || !self.capture.on_error(capture) {
                    log::debug!("ignoring capture error in phase {}", self.session.phase);
                    return false;
                }
                log::warn!("speech capture error: {reason}");
                self.session.last_error = Some(reason);
                self.transition(Phase::Idle);
                true
            }
            SessionEvent::CaptureEnded { capture } => {
                if self.session.phase != Phase::Listening || !self.capture.on_ended(capture) {
                    return false;
                }
                self.transition(Phase::Idle);
                true
            }
            SessionEvent::SpeechFinished { utterance } => {
                if !self.output.on_finished(utterance) {
                    return false;
                }
                // The "searching…" announcement may finish while still processing.
                if self.session.phase == Phase::Speaking {
                    self.transition(Phase::Idle);
                } else {
                    self.publish();
                }
                true
            }
        }
    }

    async fn process_transcript(&mut self, text: String) {
        self.session.last_transcript = text;
        self.transition(Phase::Processing);

        let intent = self.classifier.classify(&self.session.last_transcript);
        log::debug!(
            "classified {:?} as {:?}",
            preview_text(&self.session.last_transcript, 64),
            intent
        );

        let reply = match intent {
            Intent::MissingQuery => missing_query_message(),
            Intent::Unrecognized(text) => unrecognized_message(&text),
            Intent::Search(query) => {
                // Announce before the network call resolves.
                self.say(searching_message(&query));
                self.publish();

                match self.search.search(&query).await {
                    Ok(outcome) => {
                        let msg = outcome_message(&outcome);
                        self.session.last_outcome = Some(outcome);
                        msg
                    }
                    Err(fault) => {
                        log::error!("search failed: {fault}");
                        search_fault_message()
                    }
                }
            }
        };

        if self.say(reply) {
            self.transition(Phase::Speaking);
        } else {
            // Nothing will report completion; go straight back.
            self.transition(Phase::Idle);
        }
    }

    fn say(&mut self, text: String) -> bool {
        let started = self.output.speak(&text).is_some();
        self.session.last_response_text = text;
        started
    }

    fn transition(&mut self, next: Phase) {
        let prev = self.session.phase;
        if prev != next {
            log::info!("session phase: {prev} -> {next}");
        }
        self.session.phase = next;
        self.publish();
    }

    fn publish(&mut self) {
        self.snapshots.send_replace(self.snapshot());
    }
}
