use super::into_audio_stream;
use super::speech_repository::{SpeechRepository, SynthesisTask, SyncSynthesis, TaskStatus};
use crate::domain::tts::{ConversionError, VoiceConfig};
use async_trait::async_trait;
use aws_sdk_polly::types::{
    Engine, LanguageCode, OutputFormat, TaskStatus as PollyTaskStatus, VoiceId,
};
use aws_sdk_polly::Client as PollyClient;
use std::sync::Arc;

/// AWS Polly implementation of the speech repository.
///
/// All three calls request MP3 output. Provider failures are stringified with
/// their full debug representation so the caller has the service's diagnostic
/// detail; nothing is retried here.
pub struct PollySpeechRepository {
    client: Arc<PollyClient>,
}

impl PollySpeechRepository {
    pub fn new(client: Arc<PollyClient>) -> Self {
        Self { client }
    }

    fn map_status(status: &PollyTaskStatus) -> TaskStatus {
        match status {
            PollyTaskStatus::Completed => TaskStatus::Completed,
            PollyTaskStatus::Failed => TaskStatus::Failed,
            // Scheduled is the documented queued state: submitted, not yet running.
            PollyTaskStatus::InProgress | PollyTaskStatus::Scheduled => TaskStatus::InProgress,
            other => TaskStatus::Other(other.as_str().to_string()),
        }
    }

    fn map_task(task: aws_sdk_polly::types::SynthesisTask) -> Result<SynthesisTask, ConversionError> {
        let task_id = task.task_id.clone().ok_or_else(|| {
            ConversionError::Provider(format!(
                "synthesis task response is missing a task id: {task:?}"
            ))
        })?;
        let status = task
            .task_status
            .as_ref()
            .map(Self::map_status)
            .unwrap_or_else(|| TaskStatus::Other("missing".to_string()));

        Ok(SynthesisTask {
            task_id,
            status,
            output_uri: task.output_uri.clone(),
            request_characters: i64::from(task.request_characters),
            status_reason: task.task_status_reason.clone(),
        })
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceConfig,
    ) -> Result<SyncSynthesis, ConversionError> {
        tracing::info!(
            voice = %voice.voice_id,
            engine = %voice.engine,
            language = %voice.language_code,
            text_length = text.len(),
            "calling Polly synthesize_speech"
        );

        let response = self
            .client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice.voice_id.as_str()))
            .output_format(OutputFormat::Mp3)
            .engine(Engine::from(voice.engine.as_str()))
            .language_code(LanguageCode::from(voice.language_code.as_str()))
            .send()
            .await
            .map_err(|e| ConversionError::Provider(format!("synthesize_speech failed: {e:?}")))?;

        let request_characters = i64::from(response.request_characters);
        tracing::debug!(request_characters, "synthesize_speech succeeded");

        Ok(SyncSynthesis {
            audio: into_audio_stream(response.audio_stream),
            request_characters,
        })
    }

    async fn start_synthesis_task(
        &self,
        text: &str,
        voice: &VoiceConfig,
        output_bucket: &str,
    ) -> Result<String, ConversionError> {
        tracing::info!(
            voice = %voice.voice_id,
            engine = %voice.engine,
            language = %voice.language_code,
            output_bucket = output_bucket,
            text_length = text.len(),
            "calling Polly start_speech_synthesis_task"
        );

        let response = self
            .client
            .start_speech_synthesis_task()
            .engine(Engine::from(voice.engine.as_str()))
            .language_code(LanguageCode::from(voice.language_code.as_str()))
            .output_format(OutputFormat::Mp3)
            .output_s3_bucket_name(output_bucket)
            .text(text)
            .voice_id(VoiceId::from(voice.voice_id.as_str()))
            .send()
            .await
            .map_err(|e| {
                ConversionError::Provider(format!("start_speech_synthesis_task failed: {e:?}"))
            })?;

        let task = response.synthesis_task.ok_or_else(|| {
            ConversionError::Provider(
                "start_speech_synthesis_task returned no synthesis task".to_string(),
            )
        })?;
        task.task_id.ok_or_else(|| {
            ConversionError::Provider("submitted synthesis task has no task id".to_string())
        })
    }

    async fn get_synthesis_task(&self, task_id: &str) -> Result<SynthesisTask, ConversionError> {
        let response = self
            .client
            .get_speech_synthesis_task()
            .task_id(task_id)
            .send()
            .await
            .map_err(|e| {
                ConversionError::Provider(format!(
                    "get_speech_synthesis_task {task_id} failed: {e:?}"
                ))
            })?;

        let task = response.synthesis_task.ok_or_else(|| {
            ConversionError::Provider(format!(
                "get_speech_synthesis_task {task_id} returned no synthesis task"
            ))
        })?;
        Self::map_task(task)
    }
}
