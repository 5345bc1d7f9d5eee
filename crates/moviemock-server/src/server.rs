use crate::error::ServerError;
use crate::upstream::ReqwestUpstream;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use moviemock_core::mocks::{
    Body as MockBody, MockResponse, MockService, Outcome, Request, UpstreamError,
};
use moviemock_core::types::route::HttpMethod;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: MockService,
    /// Target for pass-through requests; `None` answers them with 502
    pub forwarder: Option<Arc<ReqwestUpstream>>,
}

impl AppState {
    pub fn new(service: MockService) -> Self {
        Self {
            service,
            forwarder: None,
        }
    }

    pub fn with_forwarder(mut self, forwarder: Arc<ReqwestUpstream>) -> Self {
        self.forwarder = Some(forwarder);
        self
    }
}

/// Every path goes to the mock service; it owns route matching.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .fallback(handle_request)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn handle_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServerError> {
    let request = to_mock_request(&method, &uri, &headers, body)?;

    match state.service.handle(&request).await? {
        Outcome::Respond(response) => into_response(response),
        Outcome::Passthrough => {
            let forwarder = state
                .forwarder
                .as_ref()
                .ok_or(UpstreamError::NotConfigured)?;
            into_response(forwarder.forward(&request).await?)
        }
        Outcome::Unhandled => {
            tracing::warn!(%method, %uri, "Unhandled request");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
    }
}

fn to_mock_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Request, ServerError> {
    let method: HttpMethod = method.as_str().parse()?;
    let url = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());

    let mut request = Request::new(method, url);
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }
    if !body.is_empty() {
        request = request.with_body(body);
    }
    Ok(request)
}

fn into_response(response: MockResponse) -> Result<Response, ServerError> {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let body = match response.body {
        MockBody::Empty => Body::empty(),
        MockBody::Text(text) => Body::from(text),
        MockBody::Json(value) => Body::from(value.to_string()),
        MockBody::Stream(stream) => Body::from_stream(stream),
    };
    Ok(builder.body(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("/movies/featured", "/movies/featured")]
    #[case("/api/recommendations?movieId=1", "/api/recommendations?movieId=1")]
    fn test_to_mock_request_keeps_query(#[case] uri: &str, #[case] expected: &str) {
        let uri: Uri = uri.parse().expect("Should parse uri");
        let request = to_mock_request(&Method::GET, &uri, &HeaderMap::new(), Bytes::new())
            .expect("Should convert");
        assert_eq!(request.url, expected);
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_none());
    }

    #[rstest]
    fn test_to_mock_request_unsupported_method() {
        let uri: Uri = "/".parse().expect("Should parse uri");
        let result = to_mock_request(&Method::TRACE, &uri, &HeaderMap::new(), Bytes::new());
        assert!(matches!(result, Err(ServerError::Method(_))));
    }

    #[rstest]
    fn test_into_response_copies_headers() {
        let response = into_response(MockResponse::json(&json!({"ok": true})))
            .expect("Should build response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
    }
}
