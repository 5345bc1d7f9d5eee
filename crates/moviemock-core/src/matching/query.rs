//! Query string and urlencoded form parsing.

use std::collections::HashMap;

/// Parse a query string (or an `application/x-www-form-urlencoded` body)
/// into a map. Keys and values are percent-decoded and `+` means space.
/// Repeated keys keep their first value.
pub fn parse_query_string(query_str: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();

    for pair in query_str.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        result.entry(decode(key)).or_insert_with(|| decode(value));
    }

    result
}

/// Query parameters of a full request URL.
pub fn query_from_url(url: &str) -> HashMap<String, String> {
    let without_fragment = url.split('#').next().unwrap_or("");
    without_fragment
        .split_once('?')
        .map(|(_, query)| parse_query_string(query))
        .unwrap_or_default()
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}
