use bytes::Bytes;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// A finite, lazily readable audio byte stream.
///
/// The stream is a single consumable sequence: once read, it cannot be
/// restarted. Whichever strategy produced it has already released its
/// provider-side handles, so the caller owns the bytes exclusively. Chunks
/// pass through untouched; writing the stream to a destination yields exactly
/// the bytes the provider or storage service supplied.
pub struct AudioStream {
    chunks: BoxStream<'static, io::Result<Bytes>>,
}

impl AudioStream {
    pub fn from_chunks(chunks: BoxStream<'static, io::Result<Bytes>>) -> Self {
        Self { chunks }
    }

    /// Wrap an already-buffered payload. Used by tests and fakes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            chunks: stream::iter([Ok(Bytes::from(bytes))]).boxed(),
        }
    }

    /// Copy the remaining audio into `writer`, returning the bytes written.
    pub async fn write_to<W>(mut self, writer: &mut W) -> io::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.chunks.try_next().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }

    /// Drain the stream into memory.
    pub async fn collect(mut self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        while let Some(chunk) = self.chunks.try_next().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer)
    }
}

impl std::fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AudioStream(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn collect_returns_the_bytes_verbatim() {
        let payload = vec![0xFF, 0xFB, 0x90, 0x00, 0x01, 0x02];
        let stream = AudioStream::from_bytes(payload.clone());
        assert_eq!(stream.collect().await.unwrap(), payload);
    }

    #[tokio::test]
    async fn write_to_preserves_chunk_order() {
        let chunks = stream::iter([
            Ok(Bytes::from_static(b"abc")),
            Ok(Bytes::from_static(b"def")),
            Ok(Bytes::from_static(b"ghi")),
        ])
        .boxed();
        let stream = AudioStream::from_chunks(chunks);

        let mut sink = Vec::new();
        let written = stream.write_to(&mut sink).await.unwrap();
        assert_eq!(written, 9);
        assert_eq!(sink, b"abcdefghi");
    }

    #[tokio::test]
    async fn read_errors_surface_to_the_consumer() {
        let chunks = stream::iter([
            Ok(Bytes::from_static(b"abc")),
            Err(io::Error::other("connection reset")),
        ])
        .boxed();
        let stream = AudioStream::from_chunks(chunks);
        assert!(stream.collect().await.is_err());
    }
}
