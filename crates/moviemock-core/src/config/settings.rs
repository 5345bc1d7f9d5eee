//! Runtime settings for the mock backend.
//!
//! Every field has a default, so an empty settings file (or none at all)
//! yields the stock behavior: 500ms latency on recommendations and stream
//! chunks, the built-in fault/pass-through movie ids, and no upstream.

use crate::types::movie::Profile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Movie id whose recommendations answer with an empty 500.
pub const DEFAULT_FAULT_MOVIE_ID: &str = "b2b7e2d9-8b2e-4b7a-9b8a-7f9a0d7f7e0e";
/// Movie id whose recommendations are forwarded to the real upstream.
pub const DEFAULT_PASSTHROUGH_MOVIE_ID: &str = "8a3c5e71-0d4f-4b2a-9e6c-f1d2b3a4c5e6";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MockSettings {
    /// URL patterns of the REST routes
    pub routes: RoutePaths,
    /// Latency added to every recommendations request
    pub recommendation_delay_ms: u64,
    /// Latency added before each forwarded stream chunk
    pub stream_chunk_delay_ms: u64,
    pub fault_movie_id: String,
    pub passthrough_movie_id: String,
    /// Append the upstream's featured movies after the fixture ones
    pub featured_bypass: bool,
    /// Base URL of the real backend used for pass-through and bypass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_url: Option<String>,
    /// Resource relayed by the stream route
    pub stream_source_url: String,
    pub stream_content_type: String,
    /// Profile returned by credential validation (email is echoed per request)
    pub profile: ProfileTemplate,
}

impl MockSettings {
    pub fn recommendation_delay(&self) -> Duration {
        Duration::from_millis(self.recommendation_delay_ms)
    }

    pub fn stream_chunk_delay(&self) -> Duration {
        Duration::from_millis(self.stream_chunk_delay_ms)
    }

    /// Settings with every artificial delay disabled.
    pub fn without_delays(self) -> Self {
        Self {
            recommendation_delay_ms: 0,
            stream_chunk_delay_ms: 0,
            ..self
        }
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            routes: RoutePaths::default(),
            recommendation_delay_ms: 500,
            stream_chunk_delay_ms: 500,
            fault_movie_id: DEFAULT_FAULT_MOVIE_ID.to_string(),
            passthrough_movie_id: DEFAULT_PASSTHROUGH_MOVIE_ID.to_string(),
            featured_bypass: false,
            upstream_url: None,
            stream_source_url:
                "https://test-videos.co.uk/vids/bigbuckbunny/mp4/h264/360/Big_Buck_Bunny_360_10s_1MB.mp4"
                    .to_string(),
            stream_content_type: "video/mp4".to_string(),
            profile: ProfileTemplate::default(),
        }
    }
}

/// URL patterns (with `{param}` placeholders) of the REST routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutePaths {
    pub featured: String,
    pub movie_detail: String,
    pub recommendations: String,
    pub stream: String,
    pub validate_credentials: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            featured: "/movies/featured".to_string(),
            movie_detail: "/movies/{slug}".to_string(),
            recommendations: "/api/recommendations".to_string(),
            stream: "/movies/{slug}/stream".to_string(),
            validate_credentials: "/auth/validate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileTemplate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

impl ProfileTemplate {
    pub fn profile_for(&self, email: &str) -> Profile {
        Profile {
            id: self.id.clone(),
            email: email.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

impl Default for ProfileTemplate {
    fn default() -> Self {
        Self {
            id: "2b225b31-904a-443b-a898-a280fa8e0356".to_string(),
            first_name: "John".to_string(),
            last_name: "Maverick".to_string(),
            avatar_url: "https://i.pravatar.cc/100?img=12".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse_config;
    use rstest::rstest;

    #[rstest]
    fn test_empty_settings_use_defaults() {
        let settings: MockSettings = parse_config("{}", "settings.json").expect("Should parse");
        assert_eq!(settings, MockSettings::default());
        assert_eq!(settings.recommendation_delay(), Duration::from_millis(500));
        assert_eq!(settings.stream_chunk_delay(), Duration::from_millis(500));
        assert_eq!(settings.fault_movie_id, DEFAULT_FAULT_MOVIE_ID);
        assert_eq!(settings.upstream_url, None);
    }

    #[rstest]
    fn test_partial_nested_settings() {
        let content = r#"
routes:
  featured: /v2/movies/featured
upstreamUrl: https://api.example.com
profile:
  firstName: Jane
"#;
        let settings: MockSettings = parse_config(content, "settings.yaml").expect("Should parse");

        assert_eq!(settings.routes.featured, "/v2/movies/featured");
        assert_eq!(settings.routes.movie_detail, "/movies/{slug}");
        assert_eq!(settings.upstream_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(settings.profile.first_name, "Jane");
        assert_eq!(settings.profile.last_name, "Maverick");
    }

    #[rstest]
    fn test_without_delays() {
        let settings = MockSettings::default().without_delays();
        assert_eq!(settings.recommendation_delay(), Duration::ZERO);
        assert_eq!(settings.stream_chunk_delay(), Duration::ZERO);
        assert_eq!(settings.fault_movie_id, DEFAULT_FAULT_MOVIE_ID);
    }

    #[rstest]
    #[case("john@example.com")]
    #[case("")]
    fn test_profile_for_echoes_email(#[case] email: &str) {
        let profile = ProfileTemplate::default().profile_for(email);
        assert_eq!(profile.email, email);
        assert_eq!(profile.id, "2b225b31-904a-443b-a898-a280fa8e0356");
        assert_eq!(profile.first_name, "John");
        assert_eq!(profile.last_name, "Maverick");
    }
}
