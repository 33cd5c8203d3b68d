// End-to-end conversion flow tests.
//
// These drive the dispatcher through both synthesis paths against fake
// provider and storage capabilities, checking strategy selection, the poll
// sequence, and that audio bytes pass through the engine untouched.

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use texttape::domain::tts::{
    voice_for_language, AudioStream, ConversionError, ConversionService, ConversionServiceApi,
    Language, PollPolicy, VoiceConfig,
};
use texttape::infrastructure::repositories::{
    AudioStoreRepository, SpeechRepository, SynthesisTask, SyncSynthesis, TaskStatus,
};

const SYNC_AUDIO: &[u8] = &[0xFF, 0xFB, 0x90, 0x00, 0x11, 0x22, 0x33];
const TASK_AUDIO: &[u8] = &[0xFF, 0xFB, 0x90, 0x00, 0x44, 0x55, 0x66, 0x77];
const TASK_ID: &str = "task-e2e-1";

#[derive(Debug, Clone, PartialEq, Eq)]
struct SubmittedTask {
    text: String,
    bucket: String,
}

struct RecordingSpeech {
    sync_billed: i64,
    statuses: Mutex<VecDeque<SynthesisTask>>,
    sync_texts: Mutex<Vec<String>>,
    submitted: Mutex<Vec<SubmittedTask>>,
    status_queries: Mutex<u32>,
}

impl RecordingSpeech {
    fn new(sync_billed: i64, statuses: Vec<SynthesisTask>) -> Self {
        Self {
            sync_billed,
            statuses: Mutex::new(statuses.into()),
            sync_texts: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            status_queries: Mutex::new(0),
        }
    }
}

#[async_trait]
impl SpeechRepository for RecordingSpeech {
    async fn synthesize(
        &self,
        text: &str,
        _voice: &VoiceConfig,
    ) -> Result<SyncSynthesis, ConversionError> {
        self.sync_texts.lock().push(text.to_string());
        Ok(SyncSynthesis {
            audio: AudioStream::from_bytes(SYNC_AUDIO.to_vec()),
            request_characters: self.sync_billed,
        })
    }

    async fn start_synthesis_task(
        &self,
        text: &str,
        _voice: &VoiceConfig,
        output_bucket: &str,
    ) -> Result<String, ConversionError> {
        self.submitted.lock().push(SubmittedTask {
            text: text.to_string(),
            bucket: output_bucket.to_string(),
        });
        Ok(TASK_ID.to_string())
    }

    async fn get_synthesis_task(&self, task_id: &str) -> Result<SynthesisTask, ConversionError> {
        assert_eq!(task_id, TASK_ID);
        *self.status_queries.lock() += 1;
        let mut statuses = self.statuses.lock();
        if statuses.len() > 1 {
            Ok(statuses.pop_front().unwrap())
        } else {
            Ok(statuses.front().expect("no scripted status").clone())
        }
    }
}

struct RecordingStore {
    fetches: Mutex<Vec<(String, String)>>,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            fetches: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AudioStoreRepository for RecordingStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<AudioStream, ConversionError> {
        self.fetches
            .lock()
            .push((bucket.to_string(), key.to_string()));
        Ok(AudioStream::from_bytes(TASK_AUDIO.to_vec()))
    }
}

fn in_progress() -> SynthesisTask {
    SynthesisTask {
        task_id: TASK_ID.to_string(),
        status: TaskStatus::InProgress,
        output_uri: None,
        request_characters: 0,
        status_reason: None,
    }
}

fn completed(billed: i64) -> SynthesisTask {
    SynthesisTask {
        task_id: TASK_ID.to_string(),
        status: TaskStatus::Completed,
        output_uri: Some("https://s3.us-east-1.amazonaws.com/tapes/synth/out.mp3".to_string()),
        request_characters: billed,
        status_reason: None,
    }
}

fn failed(reason: &str) -> SynthesisTask {
    SynthesisTask {
        task_id: TASK_ID.to_string(),
        status: TaskStatus::Failed,
        output_uri: None,
        request_characters: 0,
        status_reason: Some(reason.to_string()),
    }
}

fn service(
    speech: Arc<RecordingSpeech>,
    store: Arc<RecordingStore>,
    bucket: Option<&str>,
) -> ConversionService {
    ConversionService::new(
        speech,
        store,
        voice_for_language(Language::English),
        bucket.map(str::to_string),
        PollPolicy {
            interval: Duration::ZERO,
            max_attempts: None,
        },
    )
}

#[tokio::test]
async fn it_should_convert_short_text_synchronously() {
    let speech = Arc::new(RecordingSpeech::new(13, Vec::new()));
    let store = Arc::new(RecordingStore::new());
    let svc = service(speech.clone(), store.clone(), Some("tapes"));

    let result = svc.convert_to_speech("Hello, world.").await.unwrap();

    assert_eq!(result.characters_billed, 13);
    assert_eq!(*speech.sync_texts.lock(), vec!["Hello, world.".to_string()]);
    assert!(speech.submitted.lock().is_empty());
    assert!(store.fetches.lock().is_empty());

    // The stream written to a destination is byte-identical to what the
    // provider supplied.
    let mut written = Vec::new();
    result.audio.write_to(&mut written).await.unwrap();
    assert_eq!(written, SYNC_AUDIO);
}

#[tokio::test]
async fn it_should_convert_long_text_via_a_synthesis_task() {
    let text = "a".repeat(3000);
    let speech = Arc::new(RecordingSpeech::new(
        0,
        vec![in_progress(), in_progress(), completed(3000)],
    ));
    let store = Arc::new(RecordingStore::new());
    let svc = service(speech.clone(), store.clone(), Some("tapes"));

    let result = svc.convert_to_speech(&text).await.unwrap();

    // One submission carrying the configured bucket, three status queries,
    // then exactly one storage fetch with the key parsed from the output URI.
    assert_eq!(
        *speech.submitted.lock(),
        vec![SubmittedTask {
            text: text.clone(),
            bucket: "tapes".to_string(),
        }]
    );
    assert_eq!(*speech.status_queries.lock(), 3);
    assert_eq!(
        *store.fetches.lock(),
        vec![("tapes".to_string(), "synth/out.mp3".to_string())]
    );
    assert!(speech.sync_texts.lock().is_empty());

    assert_eq!(result.characters_billed, 3000);
    assert_eq!(result.audio.collect().await.unwrap(), TASK_AUDIO);
}

#[tokio::test]
async fn it_should_require_a_bucket_for_long_text() {
    let text = "a".repeat(3000);
    let speech = Arc::new(RecordingSpeech::new(0, Vec::new()));
    let store = Arc::new(RecordingStore::new());
    let svc = service(speech.clone(), store, None);

    let err = svc.convert_to_speech(&text).await.unwrap_err();
    assert!(matches!(err, ConversionError::Configuration(_)));
    assert!(speech.submitted.lock().is_empty());
}

#[tokio::test]
async fn it_should_surface_task_failure_without_fetching() {
    let text = "a".repeat(3000);
    let speech = Arc::new(RecordingSpeech::new(
        0,
        vec![in_progress(), failed("synthesis engine rejected the input")],
    ));
    let store = Arc::new(RecordingStore::new());
    let svc = service(speech.clone(), store.clone(), Some("tapes"));

    let err = svc.convert_to_speech(&text).await.unwrap_err();
    match err {
        ConversionError::TaskFailed { task_id, detail } => {
            assert_eq!(task_id, TASK_ID);
            assert!(detail.contains("synthesis engine rejected the input"));
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
    assert_eq!(*speech.status_queries.lock(), 2);
    assert!(store.fetches.lock().is_empty());
}
