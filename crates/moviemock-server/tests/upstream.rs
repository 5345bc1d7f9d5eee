use axum::{
    body::Body,
    extract::RawQuery,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use moviemock_core::config::settings::DEFAULT_PASSTHROUGH_MOVIE_ID;
use moviemock_core::mocks::Upstream;
use moviemock_core::{MockService, MockSettings, MovieStore};
use moviemock_server::{create_app, AppState, ReqwestUpstream};
use rstest::rstest;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

/// Stand-in for the real backend, serving on an ephemeral local port.
async fn spawn_backend() -> SocketAddr {
    let backend = Router::new()
        .route(
            "/movies/featured",
            get(|| async { Json(json!([{"id": "live-1", "slug": "live-one", "title": "Live"}])) }),
        )
        .route(
            "/api/recommendations",
            get(|RawQuery(query): RawQuery| async move {
                (
                    StatusCode::ACCEPTED,
                    [("x-backend", "real")],
                    Json(json!({"forwardedQuery": query})),
                )
                    .into_response()
            }),
        )
        .route("/video.mp4", get(|| async { "frame-bytes" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind backend");
    let addr = listener.local_addr().expect("Should have local addr");
    tokio::spawn(async move {
        axum::serve(listener, backend)
            .await
            .expect("Backend should serve");
    });
    addr
}

async fn app_with_backend(addr: SocketAddr, configure: impl FnOnce(&mut MockSettings)) -> Router {
    let mut settings = MockSettings {
        upstream_url: Some(format!("http://{addr}")),
        stream_source_url: format!("http://{addr}/video.mp4"),
        ..MockSettings::default().without_delays()
    };
    configure(&mut settings);

    let upstream = Arc::new(ReqwestUpstream::new(
        settings.upstream_url.clone(),
        settings.routes.featured.clone(),
    ));
    let store = MovieStore::with_default_fixtures().expect("Bundled fixtures should load");
    let service = MockService::new(store, settings)
        .with_upstream(upstream.clone() as Arc<dyn Upstream>);
    create_app(AppState::new(service).with_forwarder(upstream))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Should build request")
}

async fn send(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app.oneshot(get_request(uri)).await.expect("Should respond");
    let status = response.status();
    let marker = response
        .headers()
        .get("x-backend")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    (status, marker, body.to_vec())
}

#[rstest]
#[tokio::test]
async fn test_passthrough_relays_backend_answer() {
    let addr = spawn_backend().await;
    let app = app_with_backend(addr, |_| {}).await;

    let uri = format!("/api/recommendations?movieId={DEFAULT_PASSTHROUGH_MOVIE_ID}");
    let (status, marker, body) = send(app, &uri).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(marker.as_deref(), Some("real"));
    let body: Value = serde_json::from_slice(&body).expect("Body should be JSON");
    assert_eq!(
        body,
        json!({"forwardedQuery": format!("movieId={DEFAULT_PASSTHROUGH_MOVIE_ID}")})
    );
}

#[rstest]
#[tokio::test]
async fn test_featured_bypass_appends_backend_movies() {
    let addr = spawn_backend().await;
    let app = app_with_backend(addr, |settings| settings.featured_bypass = true).await;

    let (status, _, body) = send(app, "/movies/featured").await;
    assert_eq!(status, StatusCode::OK);

    let movies: Value = serde_json::from_slice(&body).expect("Body should be JSON");
    let slugs: Vec<&str> = movies
        .as_array()
        .expect("Should be an array")
        .iter()
        .filter_map(|m| m["slug"].as_str())
        .collect();
    assert_eq!(
        slugs,
        vec!["the-lord-of-the-rings", "the-matrix", "rogue-one", "interstellar", "live-one"]
    );
}

#[rstest]
#[tokio::test]
async fn test_stream_relays_backend_bytes() {
    let addr = spawn_backend().await;
    let app = app_with_backend(addr, |_| {}).await;

    let response = app
        .oneshot(get_request("/movies/the-matrix/stream"))
        .await
        .expect("Should respond");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").map(|v| v.as_bytes()),
        Some(&b"video/mp4"[..])
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    assert_eq!(&body[..], b"frame-bytes");
}

#[rstest]
#[tokio::test]
async fn test_stream_missing_on_backend_is_not_found() {
    let addr = spawn_backend().await;
    let app = app_with_backend(addr, |settings| {
        settings.stream_source_url = format!("http://{addr}/missing.mp4");
    })
    .await;

    let (status, _, body) = send(app, "/movies/the-matrix/stream").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_reqwest_upstream_against_backend() {
    let addr = spawn_backend().await;
    let upstream = ReqwestUpstream::new(Some(format!("http://{addr}/")), "/movies/featured");

    let featured = upstream.featured_movies().await.expect("Should fetch featured");
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].slug, "live-one");

    let missing = upstream
        .open_stream(&format!("http://{addr}/missing.mp4"))
        .await
        .expect("Should not fail");
    assert!(missing.is_none());
}
