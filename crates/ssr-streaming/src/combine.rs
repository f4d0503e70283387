//! Chunked HTML output streams.

use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

/// Error produced while streaming page output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("Element render failed: {0}")]
    Render(String),

    #[error("Output is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

/// A stream of HTML byte chunks.
pub type ContentStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, StreamError>> + Send>>;

/// A stream yielding a single chunk of HTML.
pub fn html_chunk(html: impl Into<String>) -> ContentStream {
    let bytes = html.into().into_bytes();
    Box::pin(stream::once(async move { Ok(bytes) }))
}

/// A stream yielding each string as its own chunk.
pub fn html_chunks<I>(chunks: I) -> ContentStream
where
    I: IntoIterator<Item = String>,
    I::IntoIter: Send + 'static,
{
    Box::pin(stream::iter(chunks.into_iter().map(|chunk| Ok(chunk.into_bytes()))))
}

/// A stream that fails immediately.
pub fn failed_stream(error: StreamError) -> ContentStream {
    Box::pin(stream::once(async move { Err(error) }))
}

/// Concatenate streams, preserving order.
///
/// Each stream is drained completely before the next one is polled.
pub fn combine(streams: Vec<ContentStream>) -> ContentStream {
    Box::pin(stream::iter(streams).flatten())
}

/// Drain a stream into a byte buffer.
pub async fn collect_bytes(mut stream: ContentStream) -> Result<Vec<u8>, StreamError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(buffer)
}

/// Drain a stream into a UTF-8 string.
pub async fn collect_string(stream: ContentStream) -> Result<String, StreamError> {
    let bytes = collect_bytes(stream).await?;
    String::from_utf8(bytes).map_err(|e| StreamError::InvalidUtf8(e.to_string()))
}
