//! In-memory record store shared by every mock route.
//!
//! `MovieStore` is a cheap-to-clone handle. Movie membership never changes
//! after construction; the only mutation is appending reviews, and `reset`
//! brings the store back to the fixtures it was built from.

use crate::config::error::ConfigError;
use crate::fixtures;
use crate::types::movie::{Author, Movie, Review, ReviewInput};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors raised by [`MovieStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate movie id in fixtures: {0}")]
    DuplicateId(String),
    #[error("Duplicate movie slug in fixtures: {0}")]
    DuplicateSlug(String),
    #[error("Cannot find a movie by ID \"{movie_id}\"")]
    MovieNotFound { movie_id: String },
}

/// Failure to build a store from fixture files.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct MovieStore {
    /// Pristine copy restored by `reset`
    fixtures: Arc<Vec<Movie>>,
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MovieStore {
    /// Create a store seeded with the given movies.
    ///
    /// Fails if two movies share an id or a slug.
    pub fn new(movies: Vec<Movie>) -> Result<Self, StoreError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for movie in &movies {
            if !ids.insert(movie.id.as_str()) {
                return Err(StoreError::DuplicateId(movie.id.clone()));
            }
            if !slugs.insert(movie.slug.as_str()) {
                return Err(StoreError::DuplicateSlug(movie.slug.clone()));
            }
        }

        Ok(Self {
            movies: Arc::new(RwLock::new(movies.clone())),
            fixtures: Arc::new(movies),
        })
    }

    /// Create a store seeded with the bundled fixtures.
    pub fn with_default_fixtures() -> Result<Self, SeedError> {
        Ok(Self::new(fixtures::default_movies()?)?)
    }

    /// Create a store seeded from fixture files matching a glob pattern.
    pub fn from_fixture_files(pattern: &str) -> Result<Self, SeedError> {
        Ok(Self::new(fixtures::load_movies(pattern)?)?)
    }

    /// Drop every appended review, restoring the fixture state.
    pub async fn reset(&self) {
        let mut movies = self.movies.write().await;
        *movies = self.fixtures.as_ref().clone();
        tracing::debug!("Movie store reset to fixtures");
    }

    /// All movies in fixture order.
    pub async fn all(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Option<Movie> {
        self.movies
            .read()
            .await
            .iter()
            .find(|movie| movie.slug == slug)
            .cloned()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Movie> {
        self.movies
            .read()
            .await
            .iter()
            .find(|movie| movie.id == id)
            .cloned()
    }

    /// Every movie except the one with `id`, order preserved.
    pub async fn list_excluding(&self, id: &str) -> Vec<Movie> {
        self.movies
            .read()
            .await
            .iter()
            .filter(|movie| movie.id != id)
            .cloned()
            .collect()
    }

    /// Reviews of a movie. An unknown movie yields no reviews rather than an error.
    pub async fn reviews_for(&self, movie_id: &str) -> Vec<Review> {
        self.movies
            .read()
            .await
            .iter()
            .find(|movie| movie.id == movie_id)
            .map(|movie| movie.reviews().to_vec())
            .unwrap_or_default()
    }

    /// Append a review to a movie and return it.
    ///
    /// The store is left untouched when the movie does not exist.
    pub async fn append_review(
        &self,
        input: ReviewInput,
        author: Author,
    ) -> Result<Review, StoreError> {
        let mut movies = self.movies.write().await;
        let movie = movies
            .iter_mut()
            .find(|movie| movie.id == input.movie_id)
            .ok_or_else(|| StoreError::MovieNotFound {
                movie_id: input.movie_id.clone(),
            })?;

        let mut extra = input.extra;
        extra.remove("id");
        extra.remove("author");
        let review = Review {
            id: Uuid::new_v4().simple().to_string(),
            text: input.text,
            rating: input.rating,
            author,
            extra,
        };
        movie
            .reviews
            .get_or_insert_with(Vec::new)
            .push(review.clone());

        tracing::debug!(movie_id = %movie.id, review_id = %review.id, "Review added");
        Ok(review)
    }
}
