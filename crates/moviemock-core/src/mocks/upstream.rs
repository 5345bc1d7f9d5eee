//! Access to the real backend behind the mocks.

use crate::mocks::response::ByteStream;
use crate::types::movie::Movie;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("No upstream is configured")]
    NotConfigured,
    #[error("Upstream request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("Upstream {url} answered with status {status}")]
    Status { url: String, status: u16 },
}

/// Real resources the mocks can fall back to.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Featured movies served by the real backend.
    async fn featured_movies(&self) -> Result<Vec<Movie>, UpstreamError>;

    /// Open a byte stream of the resource at `url`.
    ///
    /// `Ok(None)` means the resource exists but has no body to stream.
    async fn open_stream(&self, url: &str) -> Result<Option<ByteStream>, UpstreamError>;
}

/// Upstream used when no real backend is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUpstream;

#[async_trait]
impl Upstream for NoUpstream {
    async fn featured_movies(&self) -> Result<Vec<Movie>, UpstreamError> {
        Err(UpstreamError::NotConfigured)
    }

    async fn open_stream(&self, _url: &str) -> Result<Option<ByteStream>, UpstreamError> {
        Ok(None)
    }
}
