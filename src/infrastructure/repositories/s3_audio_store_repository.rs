use super::audio_store_repository::AudioStoreRepository;
use super::into_audio_stream;
use crate::domain::tts::{AudioStream, ConversionError};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use std::sync::Arc;

/// S3 implementation of the audio store: streams a finished synthesis
/// artifact back without buffering it in memory.
pub struct S3AudioStore {
    client: Arc<S3Client>,
}

impl S3AudioStore {
    pub fn new(client: Arc<S3Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AudioStoreRepository for S3AudioStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<AudioStream, ConversionError> {
        tracing::debug!(bucket = bucket, key = key, "fetching synthesized audio object");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                ConversionError::Storage(format!("get_object s3://{bucket}/{key} failed: {e:?}"))
            })?;

        Ok(into_audio_stream(response.body))
    }
}
