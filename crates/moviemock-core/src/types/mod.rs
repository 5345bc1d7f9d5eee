//! Core domain types for movies, reviews, and routes.

pub mod movie;
pub mod route;

pub use movie::{Author, Movie, Profile, Review, ReviewInput};
pub use route::{HttpMethod, OperationType, RouteKind, Transport};
