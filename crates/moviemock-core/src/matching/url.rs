//! URL pattern matching with path parameters.

use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlMatchResult {
    pub matched: bool,
    pub params: HashMap<String, String>,
}

/// Match a request URL against a pattern with `{param}` placeholders.
///
/// The query string, the scheme and host of absolute URLs, and trailing
/// slashes are ignored. Captured segments are percent-decoded.
pub fn url_matches(pattern: &str, url: &str) -> UrlMatchResult {
    let pattern = normalize_url(pattern);
    let url = normalize_url(url);

    let Some((regex, param_names)) = pattern_to_regex(&pattern) else {
        return UrlMatchResult::default();
    };

    let Some(caps) = regex.captures(&url) else {
        return UrlMatchResult::default();
    };

    let params = param_names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| {
            caps.get(i + 1).map(|m| {
                let value = urlencoding::decode(m.as_str())
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| m.as_str().to_owned());
                (name, value)
            })
        })
        .collect();

    UrlMatchResult {
        matched: true,
        params,
    }
}

/// Path of a URL without scheme, host, query, or trailing slash.
pub fn normalize_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or("");
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => without_query,
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".into()
    } else {
        trimmed.into()
    }
}

fn pattern_to_regex(pattern: &str) -> Option<(Regex, Vec<String>)> {
    let mut param_names = Vec::new();
    let mut regex_str = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c == '{' {
            let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
            param_names.push(name);
            regex_str.push_str("([^/]+)");
        } else {
            regex_str.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }

    let regex = Regex::new(&format!("^{regex_str}/?$")).ok()?;
    Some((regex, param_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/movies/featured", "/movies/featured", true, &[])]
    #[case("/movies/featured", "/movies/featured/", true, &[])]
    #[case("/movies/{slug}", "/movies/the-matrix", true, &[("slug", "the-matrix")])]
    #[case("/movies/{slug}", "/movies/featured", true, &[("slug", "featured")])]
    #[case("/movies/{slug}/stream", "/movies/rogue-one/stream", true, &[("slug", "rogue-one")])]
    #[case("/movies/{slug}", "/movies/rogue-one/stream", false, &[])]
    #[case("/movies/{slug}", "/movies", false, &[])]
    #[case("/movies/{slug}", "/movies/a%20b", true, &[("slug", "a b")])]
    #[case("/api/recommendations", "/api/recommendations?movieId=1", true, &[])]
    #[case("/api/recommendations", "https://app.example.com/api/recommendations", true, &[])]
    #[case("/movies/{slug}", "https://api.example.com/movies/the-matrix?x=1", true, &[("slug", "the-matrix")])]
    #[case("/", "https://api.example.com", true, &[])]
    #[case("/", "/", true, &[])]
    #[case("/api/users.json", "/api/users.json", true, &[])]
    #[case("/api/users.json", "/api/usersXjson", false, &[])]
    #[case("/api/(v1)", "/api/(v1)", true, &[])]
    fn test_url_matches(
        #[case] pattern: &str,
        #[case] url: &str,
        #[case] expected: bool,
        #[case] params: &[(&str, &str)],
    ) {
        let result = url_matches(pattern, url);
        assert_eq!(result.matched, expected);
        assert_eq!(result.params.len(), params.len());
        for (k, v) in params {
            assert_eq!(result.params.get(*k), Some(&(*v).to_owned()));
        }
    }

    #[rstest]
    #[case("/movies/", "/movies")]
    #[case("/movies?page=1", "/movies")]
    #[case("/movies#top", "/movies")]
    #[case("http://localhost:9090/movies/featured", "/movies/featured")]
    #[case("https://api.example.com", "/")]
    #[case("", "/")]
    fn test_normalize_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(normalize_url(url), expected);
    }
}
