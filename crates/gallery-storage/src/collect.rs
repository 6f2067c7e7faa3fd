//! Bounded collection of upload streams.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use std::error::Error as StdError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("File too large (max: {limit} bytes)")]
    PayloadTooLarge { limit: usize },

    #[error("Failed to read upload stream: {0}")]
    Io(#[source] io::Error),
}

/// Read every chunk of `stream` into a single buffer of at most `max_bytes`.
///
/// Collection stops at the first chunk that would take the running total past
/// `max_bytes`; that chunk is never copied. The stream is dropped on every
/// return path, which releases whatever resource backs it.
pub async fn collect_stream<S, E>(stream: S, max_bytes: usize) -> Result<Bytes, CollectError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    futures::pin_mut!(stream);

    let mut buffer = BytesMut::new();
    let mut total: usize = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| CollectError::Io(io::Error::other(e)))?;

        total = total.saturating_add(chunk.len());
        if total > max_bytes {
            tracing::warn!(
                limit_bytes = max_bytes,
                received_bytes = total,
                "Upload stream exceeded size limit"
            );
            return Err(CollectError::PayloadTooLarge { limit: max_bytes });
        }

        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn chunks(sizes: &[usize]) -> Vec<Result<Bytes, io::Error>> {
        sizes.iter().map(|n| Ok(Bytes::from(vec![7u8; *n]))).collect()
    }

    #[tokio::test]
    async fn test_collect_concatenates_chunks() {
        let input = vec![
            Ok::<_, io::Error>(Bytes::from_static(b"hello ")),
            Ok(Bytes::from_static(b"world")),
        ];
        let bytes = collect_stream(stream::iter(input), 64).await.unwrap();
        assert_eq!(&bytes[..], b"hello world");
    }

    #[tokio::test]
    async fn test_collect_accepts_exact_limit() {
        let bytes = collect_stream(stream::iter(chunks(&[4, 4, 2])), 10)
            .await
            .unwrap();
        assert_eq!(bytes.len(), 10);
    }

    #[tokio::test]
    async fn test_collect_empty_stream() {
        let bytes = collect_stream(stream::iter(chunks(&[])), 10).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_collect_stops_at_limit() {
        let polled = Arc::new(AtomicUsize::new(0));
        let counter = polled.clone();
        let endless = stream::repeat_with(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, io::Error>(Bytes::from(vec![0u8; 1024]))
        });

        let result = collect_stream(endless, 10 * 1024).await;
        assert!(matches!(
            result,
            Err(CollectError::PayloadTooLarge { limit: 10240 })
        ));
        assert_eq!(polled.load(Ordering::SeqCst), 11);
    }

    #[tokio::test]
    async fn test_collect_propagates_stream_error() {
        let input = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")),
        ];
        let result = collect_stream(stream::iter(input), 1024).await;
        match result {
            Err(CollectError::Io(err)) => assert!(err.to_string().contains("client went away")),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
