//! Upload-progress reporting for request bodies.
//!
//! The serialized body is split into chunks and handed to the transport as a
//! stream; the caller's callback observes cumulative bytes as each chunk is
//! pulled onto the wire.

use std::convert::Infallible;
use std::sync::Arc;

use futures::stream::{self, Stream};
use reqwest::Body;

/// Callback invoked per transmitted chunk with `(bytes_sent, bytes_total)`.
pub type UploadProgress = Arc<dyn Fn(u64, u64) + Send + Sync>;

const CHUNK_SIZE: usize = 64 * 1024;

fn progress_stream(
    payload: Vec<u8>,
    progress: UploadProgress,
) -> impl Stream<Item = Result<Vec<u8>, Infallible>> {
    let total = payload.len() as u64;
    let chunks: Vec<Vec<u8>> = payload.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let mut sent = 0u64;

    stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        progress(sent, total);
        Ok(chunk)
    }))
}

/// Wrap a serialized request body so `progress` fires as chunks go out.
pub(crate) fn progress_body(payload: Vec<u8>, progress: UploadProgress) -> Body {
    Body::wrap_stream(progress_stream(payload, progress))
}
