//! Request matching utilities.

mod graphql;
mod headers;
mod query;
mod url;

pub use graphql::{parse_operation, GraphQlOperation};
pub use headers::{header_value, media_type};
pub use query::{parse_query_string, query_from_url};
pub use url::{normalize_url, url_matches, UrlMatchResult};
