pub mod audio_store_repository;
pub mod polly_speech_repository;
pub mod s3_audio_store_repository;
pub mod speech_repository;

pub use audio_store_repository::AudioStoreRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use s3_audio_store_repository::S3AudioStore;
pub use speech_repository::{SpeechRepository, SynthesisTask, SyncSynthesis, TaskStatus};

use crate::domain::tts::AudioStream;
use aws_smithy_types::byte_stream::ByteStream;
use futures::StreamExt;
use std::io;

/// Adapt an SDK body stream into the engine's `AudioStream` without buffering.
/// Both the Polly synchronous response and S3 object bodies arrive as the same
/// smithy `ByteStream`, so the two adapters share this seam.
pub(crate) fn into_audio_stream(body: ByteStream) -> AudioStream {
    AudioStream::from_chunks(
        futures::stream::try_unfold(body, |mut body| async move {
            match body.try_next().await {
                Ok(chunk) => Ok(chunk.map(|bytes| (bytes, body))),
                Err(e) => Err(io::Error::other(e)),
            }
        })
        .boxed(),
    )
}
