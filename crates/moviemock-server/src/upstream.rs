//! reqwest-backed access to the real movie backend.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use moviemock_core::matching::normalize_url;
use moviemock_core::mocks::{Body, ByteStream, MockResponse, Request, Upstream, UpstreamError};
use moviemock_core::types::movie::Movie;
use std::io;

/// Headers that belong to a single connection and are not forwarded.
const HOP_BY_HOP: [&str; 7] = [
    "connection",
    "content-length",
    "host",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    client: reqwest::Client,
    /// Base URL of the real backend, e.g. `https://api.example.com`
    base_url: Option<String>,
    featured_path: String,
}

impl ReqwestUpstream {
    pub fn new(base_url: Option<String>, featured_path: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            featured_path: featured_path.into(),
        }
    }

    fn endpoint(&self, path_and_query: &str) -> Result<String, UpstreamError> {
        let base = self.base_url.as_ref().ok_or(UpstreamError::NotConfigured)?;
        Ok(format!("{base}{path_and_query}"))
    }

    /// Send the original request to the backend and relay its answer.
    pub async fn forward(&self, request: &Request) -> Result<MockResponse, UpstreamError> {
        let url = self.endpoint(&path_and_query(&request.url))?;
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|err| request_error(&url, err))?;
        tracing::debug!(%method, %url, "Forwarding request upstream");

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            if !HOP_BY_HOP.contains(&name.to_ascii_lowercase().as_str()) {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|err| request_error(&url, err))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !HOP_BY_HOP.contains(&name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        Ok(MockResponse {
            status,
            headers,
            body: Body::Stream(byte_stream(response)),
        })
    }
}

#[async_trait]
impl Upstream for ReqwestUpstream {
    async fn featured_movies(&self) -> Result<Vec<Movie>, UpstreamError> {
        let url = self.endpoint(&self.featured_path)?;
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| request_error(&url, err))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Vec<Movie>>()
            .await
            .map_err(|err| request_error(&url, err))
    }

    async fn open_stream(&self, url: &str) -> Result<Option<ByteStream>, UpstreamError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| request_error(url, err))?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(byte_stream(response))),
            status => Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

fn byte_stream(response: reqwest::Response) -> ByteStream {
    response
        .bytes_stream()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
        .boxed()
}

fn request_error(url: &str, err: impl std::fmt::Display) -> UpstreamError {
    UpstreamError::Request {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Path and query of a request URL, dropping any scheme and host.
fn path_and_query(url: &str) -> String {
    let path = normalize_url(url);
    match url.split_once('?') {
        Some((_, query)) => format!("{path}?{query}"),
        None => path,
    }
}
