//! Core route types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transport type for route matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Transport {
    Http,
    GraphQl,
}

/// HTTP method for route matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not one of [`HttpMethod`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported HTTP method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(UnsupportedMethod(s.to_owned())),
        }
    }
}

/// GraphQL operation type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl FromStr for OperationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(OperationType::Query),
            "mutation" => Ok(OperationType::Mutation),
            "subscription" => Ok(OperationType::Subscription),
            _ => Err(()),
        }
    }
}

/// Every request shape the mock backend answers.
///
/// The set is closed: each variant is one row of the mocked API surface.
/// [`RouteKind::PRECEDENCE`] is the order in which the router tries them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum RouteKind {
    FeaturedMovies,
    MovieStream,
    MovieDetail,
    Recommendations,
    ValidateCredentials,
    ListReviews,
    AddReview,
}

impl RouteKind {
    /// Matching order. `FeaturedMovies` and `MovieStream` come before
    /// `MovieDetail` because the detail pattern would also accept their paths.
    pub const PRECEDENCE: [RouteKind; 7] = [
        RouteKind::FeaturedMovies,
        RouteKind::MovieStream,
        RouteKind::MovieDetail,
        RouteKind::Recommendations,
        RouteKind::ValidateCredentials,
        RouteKind::ListReviews,
        RouteKind::AddReview,
    ];

    pub fn transport(&self) -> Transport {
        match self {
            RouteKind::ListReviews | RouteKind::AddReview => Transport::GraphQl,
            _ => Transport::Http,
        }
    }
}
