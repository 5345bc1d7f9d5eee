//! Mock responses produced by the routes.

use bytes::Bytes;
use futures::stream::BoxStream;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Streamed response body.
pub type ByteStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

pub enum Body {
    Empty,
    Text(String),
    Json(Value),
    Stream(ByteStream),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Body::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Body::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Response synthesised by a mock route.
#[derive(Debug)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Self {
        Self::json_with_status(200, value)
    }

    pub fn json_with_status<T: Serialize>(status: u16, value: &T) -> Self {
        let body = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize mock response");
                return Self::empty(500);
            }
        };
        Self {
            status,
            headers: vec![content_type("application/json")],
            body: Body::Json(body),
        }
    }

    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![content_type("text/plain")],
            body: Body::Text(text.into()),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn stream(stream: ByteStream, media_type: &str) -> Self {
        Self {
            status: 200,
            headers: vec![content_type(media_type)],
            body: Body::Stream(stream),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// JSON body, if any.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }
}

fn content_type(value: &str) -> (String, String) {
    ("content-type".to_string(), value.to_string())
}

/// What the host should do with a request.
#[derive(Debug)]
pub enum Outcome {
    /// Answer with a mocked response
    Respond(MockResponse),
    /// Forward the original request to the real upstream
    Passthrough,
    /// No route matched
    Unhandled,
}

impl Outcome {
    pub fn response(&self) -> Option<&MockResponse> {
        match self {
            Outcome::Respond(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<MockResponse> {
        match self {
            Outcome::Respond(response) => Some(response),
            _ => None,
        }
    }
}

impl From<MockResponse> for Outcome {
    fn from(response: MockResponse) -> Self {
        Outcome::Respond(response)
    }
}
