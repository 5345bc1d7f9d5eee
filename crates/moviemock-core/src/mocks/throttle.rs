//! Throttled relay for streamed bodies.

use crate::mocks::response::ByteStream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::time::Duration;

/// Hold every chunk of `source` for `delay` before passing it on.
///
/// Chunks and errors keep their order. The source is polled for the next
/// chunk only after the previous one has been forwarded.
pub fn throttle<S>(source: S, delay: Duration) -> ByteStream
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
{
    source
        .then(move |chunk| async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            chunk
        })
        .boxed()
}
