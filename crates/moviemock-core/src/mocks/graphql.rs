//! Resolvers for the mocked GraphQL operations.
//!
//! Resolvers return `Result`; [`execute`] turns a failure into the
//! `{"errors": [...]}` body a GraphQL server would answer with. Transport
//! status stays 200 either way.

use crate::mocks::response::MockResponse;
use crate::store::{MovieStore, StoreError};
use crate::types::movie::{Author, ReviewInput};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::future::Future;

pub type Variables = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum GraphQlError {
    #[error("Variable \"${0}\" is missing")]
    MissingVariable(&'static str),
    #[error("Variable \"${name}\" is invalid: {source}")]
    InvalidVariable {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to serialize result: {0}")]
    Serialization(serde_json::Error),
}

/// Run a resolver and render its outcome as a GraphQL response under `field`.
pub async fn execute<F>(field: &str, resolver: F) -> MockResponse
where
    F: Future<Output = Result<Value, GraphQlError>>,
{
    match resolver.await {
        Ok(value) => MockResponse::json(&json!({ "data": { field: value } })),
        Err(err) => {
            tracing::debug!(field, error = %err, "GraphQL resolver failed");
            MockResponse::json(&json!({ "errors": [{ "message": err.to_string() }] }))
        }
    }
}

/// `ListReviews`: reviews of `$movieId`.
///
/// Anything that does not name a known movie (absent, null, not a string)
/// yields an empty list.
pub async fn list_reviews(
    store: &MovieStore,
    variables: &Variables,
) -> Result<Value, GraphQlError> {
    let reviews = match variables.get("movieId").and_then(Value::as_str) {
        Some(movie_id) => store.reviews_for(movie_id).await,
        None => Vec::new(),
    };
    serde_json::to_value(reviews).map_err(GraphQlError::Serialization)
}

/// `AddReview`: append `$reviewInput` by `$author` to its movie.
pub async fn add_review(
    store: &MovieStore,
    variables: &Variables,
) -> Result<Value, GraphQlError> {
    let author: Author = variable(variables, "author")?;
    let input: ReviewInput = variable(variables, "reviewInput")?;
    let review = store.append_review(input, author).await?;
    serde_json::to_value(review).map_err(GraphQlError::Serialization)
}

fn variable<T: DeserializeOwned>(
    variables: &Variables,
    name: &'static str,
) -> Result<T, GraphQlError> {
    match variables.get(name) {
        None | Some(Value::Null) => Err(GraphQlError::MissingVariable(name)),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|source| GraphQlError::InvalidVariable { name, source }),
    }
}
