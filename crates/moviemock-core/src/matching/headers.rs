//! Case-insensitive header lookup.

use std::collections::HashMap;

/// Value of a header, compared by name without regard to case.
pub fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Media type of the `content-type` header, lowercased and without parameters.
pub fn media_type(headers: &HashMap<String, String>) -> Option<String> {
    let value = header_value(headers, "content-type")?;
    let essence = value.split(';').next().unwrap_or("").trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}
