//! HTTP host for the moviemock backend.
//!
//! Serves every request through [`moviemock_core::MockService`] and turns
//! its outcome into an axum response. Pass-through requests and upstream
//! fetches go to the real backend via [`upstream::ReqwestUpstream`].

pub mod error;
pub mod logging;
pub mod server;
pub mod upstream;

pub use error::ServerError;
pub use server::{create_app, AppState};
pub use upstream::ReqwestUpstream;
