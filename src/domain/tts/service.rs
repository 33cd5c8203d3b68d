use super::audio::AudioStream;
use super::billing::billable_characters;
use super::error::ConversionError;
use super::language::VoiceConfig;
use super::strategy::{DirectSynthesis, JobSynthesis, PollPolicy, SynthesisStrategy};
use crate::infrastructure::repositories::{AudioStoreRepository, SpeechRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Largest input routed through the synchronous call.
///
/// The provider's documented synchronous limit is ~3000 billable characters;
/// this sits a margin below it. The comparison is strict: text whose trimmed
/// length equals the cutoff takes the asynchronous task path. Update this
/// constant if the provider limit changes.
pub const SYNC_SIZE_CUTOFF: usize = 2900;

/// The provider's absolute input ceiling, which even the task path enforces.
pub const MAX_TASK_CHARACTERS: usize = 200_000;

/// What a conversion hands back: the audio stream and the character count the
/// provider actually billed for this one request. The count reflects exactly
/// this request; nothing is aggregated across calls.
#[derive(Debug)]
pub struct ConversionResult {
    pub audio: AudioStream,
    pub characters_billed: i64,
}

/// Orchestrates one conversion request end to end: estimates the billable
/// size, picks the synthesis strategy, and runs it.
pub struct ConversionService {
    direct: DirectSynthesis,
    job: JobSynthesis,
}

impl ConversionService {
    pub fn new(
        speech_repo: Arc<dyn SpeechRepository>,
        audio_store: Arc<dyn AudioStoreRepository>,
        voice: VoiceConfig,
        output_bucket: Option<String>,
        poll: PollPolicy,
    ) -> Self {
        Self {
            direct: DirectSynthesis::new(speech_repo.clone(), voice.clone()),
            job: JobSynthesis::new(speech_repo, audio_store, voice, output_bucket, poll),
        }
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Convert text to speech.
    ///
    /// This operation:
    /// - Estimates the billable size of the input (trimmed code-point count)
    /// - Routes short text through one synchronous provider call
    /// - Routes long text through an asynchronous task, polled to completion,
    ///   with the finished audio fetched from object storage
    ///
    /// Each invocation handles one request's lifecycle; concurrent requests
    /// belong on separate invocations and share nothing.
    async fn convert_to_speech(&self, text: &str) -> Result<ConversionResult, ConversionError>;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    async fn convert_to_speech(&self, text: &str) -> Result<ConversionResult, ConversionError> {
        let estimate = billable_characters(text);

        if estimate > MAX_TASK_CHARACTERS {
            return Err(ConversionError::TextTooLong {
                length: estimate,
                limit: MAX_TASK_CHARACTERS,
            });
        }

        let (strategy, path): (&dyn SynthesisStrategy, &str) = if estimate < SYNC_SIZE_CUTOFF {
            (&self.direct, "direct")
        } else {
            (&self.job, "task")
        };

        tracing::info!(
            estimated_characters = estimate,
            path = path,
            "dispatching conversion"
        );

        strategy.synthesize(text).await
    }
}
