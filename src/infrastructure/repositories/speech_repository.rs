use crate::domain::tts::{AudioStream, ConversionError, VoiceConfig};
use async_trait::async_trait;

/// Status of an asynchronous synthesis task as reported by the provider.
///
/// Only `Completed` and `Failed` are terminal. Anything the provider reports
/// that this enum does not know is carried in `Other` and treated as
/// non-terminal, so polling continues through provider-side status additions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    InProgress,
    Completed,
    Failed,
    Other(String),
}

/// Snapshot of a provider-tracked synthesis task.
///
/// Status transitions are provider-driven; the client only ever observes them
/// by polling. `output_uri` is populated once the task completes.
#[derive(Debug, Clone)]
pub struct SynthesisTask {
    pub task_id: String,
    pub status: TaskStatus,
    pub output_uri: Option<String>,
    pub request_characters: i64,
    pub status_reason: Option<String>,
}

/// Result of one synchronous synthesis call.
#[derive(Debug)]
pub struct SyncSynthesis {
    pub audio: AudioStream,
    pub request_characters: i64,
}

/// Repository for speech synthesis operations.
/// Abstracts the underlying speech provider behind the three calls the
/// conversion engine needs: synchronous synthesis, task submission, and task
/// status queries.
///
/// Implementations are responsible for:
/// - Provider-specific request encoding (the audio format is always MP3)
/// - Mapping provider failures into `ConversionError::Provider`
///
/// No call is retried here or by the caller; provider errors propagate
/// unchanged.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize text in one synchronous request.
    ///
    /// Returns the provider's audio stream together with the character count
    /// it billed for the request.
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceConfig,
    ) -> Result<SyncSynthesis, ConversionError>;

    /// Submit an asynchronous synthesis task whose output lands in
    /// `output_bucket`. Returns the provider-assigned task id.
    async fn start_synthesis_task(
        &self,
        text: &str,
        voice: &VoiceConfig,
        output_bucket: &str,
    ) -> Result<String, ConversionError>;

    /// Fetch the current snapshot of a previously submitted task.
    async fn get_synthesis_task(&self, task_id: &str) -> Result<SynthesisTask, ConversionError>;
}
