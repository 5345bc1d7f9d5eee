//! Fixture data the record store is seeded with.

use crate::config::error::ConfigError;
use crate::config::parser::{load_config, parse_json};
use crate::types::movie::Movie;
use std::path::PathBuf;

const DEFAULT_MOVIES: &str = include_str!("../fixtures/movies.json");

/// Movies bundled with the crate.
pub fn default_movies() -> Result<Vec<Movie>, ConfigError> {
    parse_json(DEFAULT_MOVIES)
}

/// Load movies from every file matching a glob pattern.
///
/// Each file holds an array of movies (YAML, JSON, or JSONC). Files are read
/// in sorted path order and their movies concatenated, so declaration order
/// across files is stable.
pub fn load_movies(pattern: &str) -> Result<Vec<Movie>, ConfigError> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<PathBuf>, _>>()?;
    if paths.is_empty() {
        return Err(ConfigError::NoFixtures(pattern.to_string()));
    }
    paths.sort();

    let mut movies = Vec::new();
    for path in paths {
        let batch: Vec<Movie> = load_config(&path)?;
        tracing::debug!(path = %path.display(), count = batch.len(), "Loaded movie fixtures");
        movies.extend(batch);
    }
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_FAULT_MOVIE_ID;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn test_default_movies_parse() {
        let movies = default_movies().expect("Bundled fixtures should parse");
        assert_eq!(movies.len(), 4);

        let ids: HashSet<_> = movies.iter().map(|m| m.id.as_str()).collect();
        let slugs: HashSet<_> = movies.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(ids.len(), movies.len());
        assert_eq!(slugs.len(), movies.len());
        assert!(ids.contains(DEFAULT_FAULT_MOVIE_ID));
    }

    #[rstest]
    fn test_load_movies_concatenates_in_path_order() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        std::fs::write(
            dir.path().join("b.yaml"),
            "- id: m3\n  slug: third\n  title: Third\n",
        )
        .expect("Should write");
        std::fs::write(
            dir.path().join("a.json"),
            r#"[{"id": "m1", "slug": "first"}, {"id": "m2", "slug": "second"}]"#,
        )
        .expect("Should write");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("Should write");

        let pattern = format!("{}/*.[jy]*", dir.path().display());
        let movies = load_movies(&pattern).expect("Should load");

        let ids: Vec<_> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[rstest]
    fn test_load_movies_no_match() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let pattern = format!("{}/*.json", dir.path().display());
        let result = load_movies(&pattern);
        assert!(matches!(result.unwrap_err(), ConfigError::NoFixtures(_)));
    }

    #[rstest]
    fn test_load_movies_invalid_pattern() {
        let result = load_movies("fixtures/[");
        assert!(matches!(result.unwrap_err(), ConfigError::Pattern(_)));
    }

    #[rstest]
    fn test_load_movies_bad_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        std::fs::write(dir.path().join("broken.json"), "[{").expect("Should write");
        let pattern = format!("{}/*.json", dir.path().display());
        let result = load_movies(&pattern);
        assert!(matches!(result.unwrap_err(), ConfigError::Json(_)));
    }
}
