use crate::domain::tts::{AudioStream, ConversionError};
use async_trait::async_trait;

/// Repository for fetching finished audio artifacts from object storage.
///
/// The job synthesis path performs exactly one fetch per completed task; the
/// returned stream is handed to the caller unmodified.
#[async_trait]
pub trait AudioStoreRepository: Send + Sync {
    /// Retrieve the object at `bucket`/`key` as a byte stream.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<AudioStream, ConversionError>;
}
