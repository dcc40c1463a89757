//! Terminal stand-ins for the speech devices: typed lines are "heard" and
//! replies are printed.

use anyhow::Context;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::task::JoinHandle;
use voicetube_engine::events::{CaptureSink, SpeechSink};
use voicetube_engine::traits::{CaptureRequest, SpeechRecognizer, SpeechRequest, SpeechSynthesizer};

/// Treats each line of `reader` as one final recognition result.
///
/// A blank line ends the capture without a transcript. End of input reports a
/// capture error and marks the device unavailable.
pub struct LineRecognizer<R> {
    lines: Arc<tokio::sync::Mutex<Lines<R>>>,
    open: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

pub type ConsoleRecognizer = LineRecognizer<BufReader<Stdin>>;

impl ConsoleRecognizer {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Arc::new(tokio::sync::Mutex::new(reader.lines())),
            open: Arc::new(AtomicBool::new(true)),
            task: Mutex::new(None),
        }
    }
}

impl<R> SpeechRecognizer for LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn is_available(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn start(&self, request: &CaptureRequest, sink: CaptureSink) -> anyhow::Result<()> {
        if !self.is_available() {
            anyhow::bail!("input closed");
        }
        let handle = tokio::runtime::Handle::try_current()
            .context("console capture needs a tokio runtime")?;

        log::debug!("console capture {} started ({})", sink.id(), request.language);
        let lines = self.lines.clone();
        let open = self.open.clone();
        let task = handle.spawn(async move {
            let next = lines.lock().await.next_line().await;
            match next {
                Ok(Some(line)) if line.trim().is_empty() => sink.ended(),
                Ok(Some(line)) => {
                    sink.transcript(line.trim().to_string());
                    sink.ended();
                }
                Ok(None) => {
                    open.store(false, Ordering::SeqCst);
                    sink.error("input closed".to_string());
                }
                Err(e) => sink.error(format!("read input: {e}")),
            }
        });

        if let Some(prev) = self.lock_task().replace(task) {
            prev.abort();
        }
        Ok(())
    }

    fn stop(&self) {
        if let Some(task) = self.lock_task().take() {
            task.abort();
        }
    }
}

impl<R> LineRecognizer<R> {
    fn lock_task(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Prints each reply and reports it finished right away.
#[derive(Debug, Default)]
pub struct ConsoleSpeaker;

impl SpeechSynthesizer for ConsoleSpeaker {
    fn is_available(&self) -> bool {
        true
    }

    fn speak(&self, request: &SpeechRequest, sink: SpeechSink) -> anyhow::Result<()> {
        println!("[voz] {}", request.text);
        sink.finished();
        Ok(())
    }

    fn cancel(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use voicetube_engine::events::SessionEvent;

    fn request() -> CaptureRequest {
        CaptureRequest {
            language: "pt-BR".into(),
        }
    }

    #[tokio::test]
    async fn each_start_reads_one_line() {
        let rec = LineRecognizer::new(BufReader::new(&b"pesquisar gatos\n\n"[..]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        rec.start(&request(), CaptureSink::new(1, tx.clone())).unwrap();
        assert_eq!(
            rx.recv().await,
            Some(SessionEvent::Transcript {
                capture: 1,
                text: "pesquisar gatos".into()
            })
        );
        assert_eq!(rx.recv().await, Some(SessionEvent::CaptureEnded { capture: 1 }));

        // Blank line: nothing heard.
        rec.start(&request(), CaptureSink::new(2, tx.clone())).unwrap();
        assert_eq!(rx.recv().await, Some(SessionEvent::CaptureEnded { capture: 2 }));
        assert!(rec.is_available());
    }

    #[tokio::test]
    async fn end_of_input_closes_the_device() {
        let rec = LineRecognizer::new(BufReader::new(&b""[..]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        rec.start(&request(), CaptureSink::new(7, tx)).unwrap();
        assert_eq!(
            rx.recv().await,
            Some(SessionEvent::CaptureError {
                capture: 7,
                reason: "input closed".into()
            })
        );
        assert!(!rec.is_available());
        let (tx, _) = mpsc::unbounded_channel();
        assert!(rec.start(&request(), CaptureSink::new(8, tx)).is_err());
    }

    #[test]
    fn start_outside_runtime_is_an_error() {
        let rec = LineRecognizer::new(BufReader::new(&b"x\n"[..]));
        let (tx, _) = mpsc::unbounded_channel();
        assert!(rec.start(&request(), CaptureSink::new(1, tx)).is_err());
    }

    #[test]
    fn speaker_finishes_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let req = SpeechRequest {
            text: "olá".into(),
            language: "pt-BR".into(),
            rate: 1.0,
            pitch: 1.0,
        };
        ConsoleSpeaker.speak(&req, SpeechSink::new(3, tx)).unwrap();
        assert_eq!(rx.try_recv().ok(), Some(SessionEvent::SpeechFinished { utterance: 3 }));
    }
}
