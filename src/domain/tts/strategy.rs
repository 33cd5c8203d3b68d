use super::error::ConversionError;
use super::language::VoiceConfig;
use super::service::ConversionResult;
use crate::infrastructure::repositories::{AudioStoreRepository, SpeechRepository, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Waiting policy for the job path's status poll.
///
/// The default mirrors the provider's own task lifetime: a fixed 5 second
/// interval and no upper bound on attempts. Callers that need bounded waiting
/// set `max_attempts`; exhausting it surfaces `PollBudgetExhausted` without
/// touching the remote task, which keeps running on the provider side.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

/// One conversion algorithm: text in, audio stream and billed characters out.
///
/// Both implementations receive already-constructed capability handles; they
/// never build provider clients themselves.
#[async_trait]
pub trait SynthesisStrategy: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<ConversionResult, ConversionError>;
}

/// Short-text path: a single synchronous provider call.
pub struct DirectSynthesis {
    speech_repo: Arc<dyn SpeechRepository>,
    voice: VoiceConfig,
}

impl DirectSynthesis {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>, voice: VoiceConfig) -> Self {
        Self { speech_repo, voice }
    }
}

#[async_trait]
impl SynthesisStrategy for DirectSynthesis {
    async fn synthesize(&self, text: &str) -> Result<ConversionResult, ConversionError> {
        let synthesis = self.speech_repo.synthesize(text, &self.voice).await?;

        tracing::info!(
            request_characters = synthesis.request_characters,
            "synchronous synthesis finished"
        );

        Ok(ConversionResult {
            audio: synthesis.audio,
            characters_billed: synthesis.request_characters,
        })
    }
}

/// Long-text path: submit a synthesis task, poll it to a terminal state, then
/// fetch the finished artifact from object storage.
pub struct JobSynthesis {
    speech_repo: Arc<dyn SpeechRepository>,
    audio_store: Arc<dyn AudioStoreRepository>,
    voice: VoiceConfig,
    output_bucket: Option<String>,
    poll: PollPolicy,
}

impl JobSynthesis {
    pub fn new(
        speech_repo: Arc<dyn SpeechRepository>,
        audio_store: Arc<dyn AudioStoreRepository>,
        voice: VoiceConfig,
        output_bucket: Option<String>,
        poll: PollPolicy,
    ) -> Self {
        Self {
            speech_repo,
            audio_store,
            voice,
            output_bucket,
            poll,
        }
    }
}

#[async_trait]
impl SynthesisStrategy for JobSynthesis {
    async fn synthesize(&self, text: &str) -> Result<ConversionResult, ConversionError> {
        // Guard before any provider call: submitting without a destination
        // would start a task whose output we could never retrieve.
        let bucket = self.output_bucket.as_deref().ok_or_else(|| {
            ConversionError::Configuration(
                "an output bucket is required for long text; pass --bucket or set TTS_OUTPUT_BUCKET"
                    .to_string(),
            )
        })?;

        let task_id = self
            .speech_repo
            .start_synthesis_task(text, &self.voice, bucket)
            .await?;

        tracing::info!(task_id = %task_id, "synthesis task submitted");

        let mut attempts: u32 = 0;
        loop {
            let task = self.speech_repo.get_synthesis_task(&task_id).await?;
            attempts += 1;

            match task.status {
                TaskStatus::Completed => {
                    let output_uri = task.output_uri.clone().ok_or_else(|| {
                        ConversionError::Provider(format!(
                            "task {task_id} completed without an output URI: {task:?}"
                        ))
                    })?;
                    let key = object_key_from_uri(&output_uri).ok_or_else(|| {
                        ConversionError::Provider(format!(
                            "unexpected output URI format: {output_uri}"
                        ))
                    })?;

                    tracing::info!(
                        task_id = %task_id,
                        attempts,
                        key = %key,
                        request_characters = task.request_characters,
                        "synthesis task completed, fetching audio"
                    );

                    let audio = self.audio_store.get_object(bucket, &key).await?;
                    return Ok(ConversionResult {
                        audio,
                        characters_billed: task.request_characters,
                    });
                }
                TaskStatus::Failed => {
                    return Err(ConversionError::TaskFailed {
                        task_id,
                        detail: format!("{task:?}"),
                    });
                }
                TaskStatus::InProgress => {}
                TaskStatus::Other(ref status) => {
                    tracing::warn!(
                        task_id = %task_id,
                        status = %status,
                        "unrecognized task status, continuing to poll"
                    );
                }
            }

            if let Some(max) = self.poll.max_attempts {
                if attempts >= max {
                    return Err(ConversionError::PollBudgetExhausted { task_id, attempts });
                }
            }

            tokio::time::sleep(self.poll.interval).await;
        }
    }
}

/// Derive the storage key from a task's output URI.
///
/// Output URIs arrive as https URLs of the form
/// `https://s3.<region>.amazonaws.com/<bucket>/<key...>`; the key is
/// everything after the first four slash-delimited segments (scheme, empty
/// authority separator, host, bucket). If the provider ever changes the URI
/// shape, this fixed-offset contract is the single place to update.
fn object_key_from_uri(uri: &str) -> Option<String> {
    let segments: Vec<&str> = uri.split('/').skip(4).collect();
    if segments.is_empty() || segments.iter().all(|s| s.is_empty()) {
        return None;
    }
    Some(segments.join("/"))
}
