//! Movie and review records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Movie record as served by the mock backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Unique identifier
    pub id: String,
    /// Unique human-readable key used in URLs
    pub slug: String,
    /// Reviews in insertion order, `None` until the first one is added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    /// Descriptive fields (title, image, ...) passed through untouched
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Movie {
    pub fn reviews(&self) -> &[Review] {
        self.reviews.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub text: String,
    pub rating: Number,
    pub author: Author,
    /// Any other submitted fields, kept as sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Review fields submitted through the `AddReview` mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub movie_id: String,
    pub text: String,
    pub rating: Number,
    /// Extra review fields, copied onto the stored review
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Synthetic user profile returned by credential validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}
