//! Mock routes and their responses.
//!
//! - [`MockRouter`]: Ordered route table, picks the route a request matches
//! - [`MockService`]: Runs the matched route against the store and settings
//! - [`Upstream`]: Seam to the real backend for bypass, pass-through and streaming

pub mod graphql;
pub mod response;
pub mod router;
pub mod service;
pub mod throttle;
pub mod upstream;

pub use response::{Body, ByteStream, MockResponse, Outcome};
pub use router::{MatchedRoute, MockRouter, Request};
pub use service::MockService;
pub use upstream::{NoUpstream, Upstream, UpstreamError};
