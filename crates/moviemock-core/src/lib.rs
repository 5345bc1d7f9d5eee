//! Core library for the moviemock backend.
//!
//! Holds the in-memory movie store, request matching for REST and GraphQL
//! routes, and the canned responses served for them. The library knows
//! nothing about sockets; hosts translate their requests into
//! [`mocks::Request`] and act on the returned [`mocks::Outcome`].

pub mod config;
pub mod fixtures;
pub mod matching;
pub mod mocks;
pub mod store;
pub mod types;

pub use config::{ConfigError, MockSettings};
pub use mocks::{MockResponse, MockService, Outcome, Request};
pub use store::MovieStore;
