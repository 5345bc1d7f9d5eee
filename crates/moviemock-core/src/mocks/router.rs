//! Route table and request matching.
//!
//! The router holds one [`RouteDefinition`] per [`RouteKind`], ordered by
//! [`RouteKind::PRECEDENCE`], and returns the first one a request satisfies.

use crate::config::settings::RoutePaths;
use crate::matching::{parse_operation, query_from_url, url_matches, GraphQlOperation};
use crate::types::route::{HttpMethod, OperationType, RouteKind, Transport};
use bytes::Bytes;
use std::collections::HashMap;

/// Transport-neutral description of an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    /// Request URL (path + query string, or an absolute URL)
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// How a route recognises its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Method plus URL pattern with `{param}` placeholders
    Http { method: HttpMethod, url: String },
    /// GraphQL operation on any path
    GraphQl {
        operation_type: OperationType,
        operation_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub kind: RouteKind,
    pub matcher: Matcher,
}

impl RouteDefinition {
    pub fn new(kind: RouteKind, paths: &RoutePaths) -> Self {
        let http = |method, url: &str| Matcher::Http {
            method,
            url: url.to_string(),
        };
        let graphql = |operation_type, name: &str| Matcher::GraphQl {
            operation_type,
            operation_name: name.to_string(),
        };

        let matcher = match kind {
            RouteKind::FeaturedMovies => http(HttpMethod::Get, &paths.featured),
            RouteKind::MovieStream => http(HttpMethod::Get, &paths.stream),
            RouteKind::MovieDetail => http(HttpMethod::Get, &paths.movie_detail),
            RouteKind::Recommendations => http(HttpMethod::Get, &paths.recommendations),
            RouteKind::ValidateCredentials => {
                http(HttpMethod::Post, &paths.validate_credentials)
            }
            RouteKind::ListReviews => graphql(OperationType::Query, "ListReviews"),
            RouteKind::AddReview => graphql(OperationType::Mutation, "AddReview"),
        };

        Self { kind, matcher }
    }

    pub fn transport(&self) -> Transport {
        match self.matcher {
            Matcher::Http { .. } => Transport::Http,
            Matcher::GraphQl { .. } => Transport::GraphQl,
        }
    }
}

/// A route selected for a request, with everything extracted while matching.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRoute {
    pub kind: RouteKind,
    /// URL path parameters
    pub params: HashMap<String, String>,
    /// Query string parameters
    pub query: HashMap<String, String>,
    /// Present for GraphQL routes
    pub operation: Option<GraphQlOperation>,
}

#[derive(Debug, Clone)]
pub struct MockRouter {
    routes: Vec<RouteDefinition>,
}

impl MockRouter {
    pub fn new(paths: &RoutePaths) -> Self {
        Self {
            routes: RouteKind::PRECEDENCE
                .iter()
                .map(|kind| RouteDefinition::new(*kind, paths))
                .collect(),
        }
    }

    /// Route definitions in matching order.
    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// Find the first route that matches the given request.
    ///
    /// Returns `None` if no route matches.
    pub fn find_route(&self, request: &Request) -> Option<MatchedRoute> {
        let operation = parse_operation(request);

        self.routes.iter().find_map(|route| match &route.matcher {
            Matcher::Http { method, url } => {
                if *method != request.method {
                    return None;
                }
                let url_result = url_matches(url, &request.url);
                url_result.matched.then(|| MatchedRoute {
                    kind: route.kind,
                    params: url_result.params,
                    query: query_from_url(&request.url),
                    operation: None,
                })
            }
            Matcher::GraphQl {
                operation_type,
                operation_name,
            } => {
                let op = operation.as_ref()?;
                let matched = op.operation_type == *operation_type
                    && op.operation_name.as_deref() == Some(operation_name.as_str());
                matched.then(|| MatchedRoute {
                    kind: route.kind,
                    params: HashMap::new(),
                    query: HashMap::new(),
                    operation: Some(op.clone()),
                })
            }
        })
    }
}

impl Default for MockRouter {
    fn default() -> Self {
        Self::new(&RoutePaths::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn graphql_request(query: &str) -> Request {
        Request::new(HttpMethod::Post, "/graphql")
            .with_header("content-type", "application/json")
            .with_body(json!({"query": query, "variables": {"movieId": "m1"}}).to_string())
    }

    #[rstest]
    fn test_routes_follow_precedence() {
        let router = MockRouter::default();
        let kinds: Vec<RouteKind> = router.routes().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, RouteKind::PRECEDENCE.to_vec());
    }

    #[rstest]
    #[case(RouteKind::FeaturedMovies, Transport::Http)]
    #[case(RouteKind::AddReview, Transport::GraphQl)]
    fn test_route_definition_transport(#[case] kind: RouteKind, #[case] expected: Transport) {
        let route = RouteDefinition::new(kind, &RoutePaths::default());
        assert_eq!(route.transport(), expected);
        assert_eq!(route.transport(), kind.transport());
    }

    #[rstest]
    #[case(HttpMethod::Get, "/movies/featured", Some(RouteKind::FeaturedMovies))]
    #[case(HttpMethod::Get, "https://api.example.com/movies/featured", Some(RouteKind::FeaturedMovies))]
    #[case(HttpMethod::Get, "/movies/the-matrix", Some(RouteKind::MovieDetail))]
    #[case(HttpMethod::Get, "/movies/the-matrix/stream", Some(RouteKind::MovieStream))]
    #[case(HttpMethod::Get, "/api/recommendations", Some(RouteKind::Recommendations))]
    #[case(HttpMethod::Get, "/api/recommendations?movieId=1", Some(RouteKind::Recommendations))]
    #[case(HttpMethod::Post, "/auth/validate", Some(RouteKind::ValidateCredentials))]
    #[case(HttpMethod::Get, "/auth/validate", None)]
    #[case(HttpMethod::Post, "/movies/featured", None)]
    #[case(HttpMethod::Delete, "/movies/the-matrix", None)]
    #[case(HttpMethod::Get, "/unknown", None)]
    fn test_find_http_route(
        #[case] method: HttpMethod,
        #[case] url: &str,
        #[case] expected: Option<RouteKind>,
    ) {
        let router = MockRouter::default();
        let found = router.find_route(&Request::new(method, url));
        assert_eq!(found.map(|m| m.kind), expected);
    }

    #[rstest]
    fn test_find_route_extracts_params_and_query() {
        let router = MockRouter::default();
        let found = router
            .find_route(&Request::new(
                HttpMethod::Get,
                "/movies/rogue-one?autoplay=true",
            ))
            .expect("Should match");

        assert_eq!(found.kind, RouteKind::MovieDetail);
        assert_eq!(found.params.get("slug").map(String::as_str), Some("rogue-one"));
        assert_eq!(found.query.get("autoplay").map(String::as_str), Some("true"));
        assert_eq!(found.operation, None);
    }

    #[rstest]
    #[case("query ListReviews($movieId: ID!) { reviews(movieId: $movieId) { id } }", Some(RouteKind::ListReviews))]
    #[case("mutation AddReview { addReview { id } }", Some(RouteKind::AddReview))]
    #[case("mutation ListReviews { reviews { id } }", None)]
    #[case("query AddReview { addReview { id } }", None)]
    #[case("query GetMovie { movie { id } }", None)]
    #[case("{ reviews { id } }", None)]
    fn test_find_graphql_route(#[case] query: &str, #[case] expected: Option<RouteKind>) {
        let router = MockRouter::default();
        let found = router.find_route(&graphql_request(query));
        assert_eq!(found.as_ref().map(|m| m.kind), expected);
        if let Some(found) = found {
            let operation = found.operation.expect("GraphQL routes carry the operation");
            assert_eq!(operation.variables.get("movieId"), Some(&json!("m1")));
        }
    }

    #[rstest]
    fn test_graphql_matches_on_any_path() {
        let router = MockRouter::default();
        let request = Request {
            url: "https://api.example.com/v1/graphql".to_string(),
            ..graphql_request("query ListReviews { reviews { id } }")
        };
        let found = router.find_route(&request).expect("Should match");
        assert_eq!(found.kind, RouteKind::ListReviews);
    }

    #[rstest]
    fn test_custom_paths() {
        let paths = RoutePaths {
            featured: "/v2/featured".to_string(),
            ..RoutePaths::default()
        };
        let router = MockRouter::new(&paths);

        let found = router.find_route(&Request::new(HttpMethod::Get, "/v2/featured"));
        assert_eq!(found.map(|m| m.kind), Some(RouteKind::FeaturedMovies));

        let found = router.find_route(&Request::new(HttpMethod::Get, "/movies/featured"));
        assert_eq!(found.map(|m| m.kind), Some(RouteKind::MovieDetail));
    }
}
