//! Dispatch of requests to the mock routes.
//!
//! `MockService` ties the router, the record store, the settings, and the
//! upstream seam together. Each route handler is a small function of the
//! matched request and the store; none of them keeps state of its own.

use crate::config::settings::MockSettings;
use crate::matching::{media_type, parse_query_string};
use crate::mocks::graphql::{self, Variables};
use crate::mocks::response::{MockResponse, Outcome};
use crate::mocks::router::{MatchedRoute, MockRouter, Request};
use crate::mocks::throttle::throttle;
use crate::mocks::upstream::{NoUpstream, Upstream, UpstreamError};
use crate::store::MovieStore;
use crate::types::route::RouteKind;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct MockService {
    store: MovieStore,
    settings: Arc<MockSettings>,
    router: MockRouter,
    upstream: Arc<dyn Upstream>,
}

impl MockService {
    /// Create a service with no upstream behind it.
    pub fn new(store: MovieStore, settings: MockSettings) -> Self {
        Self {
            router: MockRouter::new(&settings.routes),
            settings: Arc::new(settings),
            store,
            upstream: Arc::new(NoUpstream),
        }
    }

    pub fn with_upstream(mut self, upstream: Arc<dyn Upstream>) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn settings(&self) -> &MockSettings {
        &self.settings
    }

    pub fn router(&self) -> &MockRouter {
        &self.router
    }

    /// Resolve a request to a mocked response, a pass-through, or nothing.
    ///
    /// Only failures of the upstream (bypass fetch, stream source) are
    /// returned as errors; every other failure is a mocked response.
    pub async fn handle(&self, request: &Request) -> Result<Outcome, UpstreamError> {
        let Some(matched) = self.router.find_route(request) else {
            tracing::debug!(method = %request.method, url = %request.url, "No mock route matched");
            return Ok(Outcome::Unhandled);
        };
        tracing::debug!(route = ?matched.kind, url = %request.url, "Mock route matched");

        let outcome = match matched.kind {
            RouteKind::FeaturedMovies => self.featured_movies().await?.into(),
            RouteKind::MovieDetail => self.movie_detail(&matched).await.into(),
            RouteKind::Recommendations => self.recommendations(&matched).await,
            RouteKind::MovieStream => self.movie_stream().await?.into(),
            RouteKind::ValidateCredentials => self.validate_credentials(request).into(),
            RouteKind::ListReviews => {
                let variables = operation_variables(matched);
                graphql::execute("reviews", graphql::list_reviews(&self.store, &variables))
                    .await
                    .into()
            }
            RouteKind::AddReview => {
                let variables = operation_variables(matched);
                graphql::execute("addReview", graphql::add_review(&self.store, &variables))
                    .await
                    .into()
            }
        };
        Ok(outcome)
    }

    async fn featured_movies(&self) -> Result<MockResponse, UpstreamError> {
        let mut movies = self.store.all().await;
        if self.settings.featured_bypass {
            let live = self.upstream.featured_movies().await?;
            tracing::debug!(count = live.len(), "Appending upstream featured movies");
            movies.extend(live);
        }
        Ok(MockResponse::json(&movies))
    }

    async fn movie_detail(&self, matched: &MatchedRoute) -> MockResponse {
        let slug = matched.params.get("slug").map(String::as_str).unwrap_or("");
        match self.store.find_by_slug(slug).await {
            Some(movie) => MockResponse::json(&movie),
            None => MockResponse::text(404, "Not found"),
        }
    }

    async fn recommendations(&self, matched: &MatchedRoute) -> Outcome {
        let delay = self.settings.recommendation_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let Some(movie_id) = matched.query.get("movieId").filter(|id| !id.is_empty()) else {
            return MockResponse::json_with_status(
                400,
                &json!({ "error": "Missing query parameter \"movieId\"" }),
            )
            .into();
        };

        if *movie_id == self.settings.fault_movie_id {
            return MockResponse::empty(500).into();
        }
        if *movie_id == self.settings.passthrough_movie_id {
            return Outcome::Passthrough;
        }

        MockResponse::json(&self.store.list_excluding(movie_id).await).into()
    }

    async fn movie_stream(&self) -> Result<MockResponse, UpstreamError> {
        let source = self
            .upstream
            .open_stream(&self.settings.stream_source_url)
            .await?;

        Ok(match source {
            Some(source) => MockResponse::stream(
                throttle(source, self.settings.stream_chunk_delay()),
                &self.settings.stream_content_type,
            ),
            None => MockResponse::empty(404),
        })
    }

    fn validate_credentials(&self, request: &Request) -> MockResponse {
        let fields = form_fields(request);
        let field = |name: &str| fields.get(name).filter(|v| !v.is_empty());

        match (field("email"), field("password")) {
            (Some(email), Some(_)) => MockResponse::json(&self.settings.profile.profile_for(email)),
            _ => MockResponse::empty(400),
        }
    }
}

fn operation_variables(matched: MatchedRoute) -> Variables {
    matched
        .operation
        .map(|operation| operation.variables)
        .unwrap_or_default()
}

/// Form fields of a request body: a JSON object of strings, or urlencoded.
fn form_fields(request: &Request) -> HashMap<String, String> {
    let Some(body) = request.body.as_ref() else {
        return HashMap::new();
    };

    match media_type(&request.headers) {
        Some(media_type) if media_type.contains("json") => {
            serde_json::from_slice::<Map<String, Value>>(body)
                .map(|object| {
                    object
                        .into_iter()
                        .filter_map(|(k, v)| match v {
                            Value::String(s) => Some((k, s)),
                            _ => None,
                        })
                        .collect()
                })
                .unwrap_or_default()
        }
        _ => parse_query_string(&String::from_utf8_lossy(body)),
    }
}
