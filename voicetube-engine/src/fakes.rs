// In-memory devices for unit tests.

use crate::error::ProviderError;
use crate::events::{CaptureSink, SpeechSink};
use crate::traits::{
    CaptureRequest, SearchProvider, SpeechRecognizer, SpeechRequest, SpeechSynthesizer,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use voicetube_core::types::{SearchRequest, VideoResult};

pub(crate) struct FakeRecognizer {
    pub available: bool,
    pub fail_start: bool,
    pub sinks: Mutex<Vec<CaptureSink>>,
    pub requests: Mutex<Vec<CaptureRequest>>,
    pub stops: AtomicUsize,
}

impl FakeRecognizer {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_start: false,
            sinks: Mutex::new(vec![]),
            requests: Mutex::new(vec![]),
            stops: AtomicUsize::new(0),
        }
    }

    pub fn last_sink(&self) -> CaptureSink {
        self.sinks.lock().unwrap().last().cloned().unwrap()
    }

    pub fn starts(&self) -> usize {
        self.sinks.lock().unwrap().len()
    }
}

impl SpeechRecognizer for FakeRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn start(&self, request: &CaptureRequest, sink: CaptureSink) -> anyhow::Result<()> {
        if self.fail_start {
            anyhow::bail!("not-allowed");
        }
        self.requests.lock().unwrap().push(request.clone());
        self.sinks.lock().unwrap().push(sink);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) struct FakeSynthesizer {
    pub available: bool,
    pub auto_finish: bool,
    pub spoken: Mutex<Vec<SpeechRequest>>,
    pub sinks: Mutex<Vec<SpeechSink>>,
    pub cancels: AtomicUsize,
}

impl FakeSynthesizer {
    pub fn new() -> Self {
        Self {
            available: true,
            auto_finish: false,
            spoken: Mutex::new(vec![]),
            sinks: Mutex::new(vec![]),
            cancels: AtomicUsize::new(0),
        }
    }

    pub fn auto_finishing() -> Self {
        Self {
            auto_finish: true,
            ..Self::new()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    pub fn sink(&self, index: usize) -> SpeechSink {
        self.sinks.lock().unwrap()[index].clone()
    }
}

impl SpeechSynthesizer for FakeSynthesizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&self, request: &SpeechRequest, sink: SpeechSink) -> anyhow::Result<()> {
        self.spoken.lock().unwrap().push(request.clone());
        if self.auto_finish {
            sink.finished();
        }
        self.sinks.lock().unwrap().push(sink);
        Ok(())
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) enum FakeBehavior {
    Results(Vec<VideoResult>),
    Fail(ProviderError),
    Hang,
}

pub(crate) struct FakeProvider {
    behavior: FakeBehavior,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<SearchRequest>>,
}

impl FakeProvider {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn returning(count: usize) -> Self {
        Self::new(FakeBehavior::Results(videos(count)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchProvider for FakeProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<VideoResult>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.behavior {
            FakeBehavior::Results(r) => Ok(r.clone()),
            FakeBehavior::Fail(e) => Err(e.clone()),
            FakeBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(vec![])
            }
        }
    }
}

pub(crate) fn videos(count: usize) -> Vec<VideoResult> {
    (0..count)
        .map(|i| {
            VideoResult::new(
                format!("vid{i}"),
                format!("Video {i}"),
                "Canal",
                format!("https://i.ytimg.com/vi/vid{i}/mqdefault.jpg"),
            )
        })
        .collect()
}
