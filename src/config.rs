//! Runtime configuration for the API client.
//!
//! Values are layered: built-in defaults, then an optional RON file, then
//! environment overrides. Command-line flags are applied last by the CLI.

use crate::errors::{PokedexError, PokedexResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EXPANDED_CONCURRENCY: usize = 1;

pub const ENV_API_URL: &str = "POKEDEX_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "POKEDEX_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root every `{kind}/{identifier}` path is resolved against
    pub api_url: String,
    /// Upper bound on a single HTTP request
    pub timeout_secs: u64,
    /// How many sub-entities of one Pokemon are fetched at once in expanded mode
    pub expanded_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            expanded_concurrency: DEFAULT_EXPANDED_CONCURRENCY,
        }
    }
}

impl Config {
    /// Defaults, overlaid with the RON file at `path` (if any), overlaid with the process environment.
    ///
    /// Not validated here: command-line flags may still override any field,
    /// so callers validate the final merged value.
    pub fn load(path: Option<&Path>) -> PokedexResult<Config> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    PokedexError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_ron_str(&content)?
            }
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a RON config document. Missing fields keep their defaults.
    pub fn from_ron_str(content: &str) -> PokedexResult<Config> {
        ron::from_str(content).map_err(|e| PokedexError::Config(format!("malformed RON: {}", e)))
    }

    /// Apply overrides from an environment lookup function.
    pub fn apply_env<F>(&mut self, lookup: F) -> PokedexResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                PokedexError::Config(format!("{} must be a whole number, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> PokedexResult<()> {
        if self.api_url.trim().is_empty() {
            return Err(PokedexError::Config("api_url must not be empty".to_string()));
        }
        self.base_url()?;
        if self.timeout_secs == 0 {
            return Err(PokedexError::Config("timeout_secs must be at least 1".to_string()));
        }
        if self.expanded_concurrency == 0 {
            return Err(PokedexError::Config(
                "expanded_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn base_url(&self) -> PokedexResult<Url> {
        let url = Url::parse(self.api_url.trim())
            .map_err(|e| PokedexError::Config(format!("invalid api_url '{}': {}", self.api_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(PokedexError::Config(format!(
                "api_url '{}' cannot take path segments",
                self.api_url
            )));
        }
        Ok(url)
    }

    /// Full URL for one lookup, e.g. `https://pokeapi.co/api/v2/pokemon/pikachu`.
    ///
    /// The identifier is always a single percent-encoded path segment, so
    /// `?`, `#` and `/` inside it never become a query, fragment or extra path.
    pub fn endpoint(&self, path_segment: &str, identifier: &str) -> PokedexResult<Url> {
        let mut url = self.base_url()?;
        url.path_segments_mut()
            .map_err(|_| PokedexError::Config(format!("api_url '{}' cannot take path segments", self.api_url)))?
            .pop_if_empty()
            .push(path_segment)
            .push(identifier);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_point_at_pokeapi() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.expanded_concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ron_file_overrides_only_given_fields() {
        let config = Config::from_ron_str("(timeout_secs: 3)").unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_malformed_ron_is_config_error() {
        let err = Config::from_ron_str("(timeout_secs: \"soon\")").unwrap_err();
        assert!(matches!(err, PokedexError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "http://localhost:8000/api/v2"),
            (ENV_TIMEOUT_SECS, "2"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_url, "http://localhost:8000/api/v2");
        assert_eq!(config.timeout_secs, 2);
    }

    #[test]
    fn test_bad_env_timeout_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_env(|key| (key == ENV_TIMEOUT_SECS).then(|| "ten".to_string()));
        assert!(matches!(result, Err(PokedexError::Config(_))));
    }

    #[test]
    fn test_zero_values_fail_validation() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            expanded_concurrency: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let with_slash = Config::default();
        let without_slash = Config {
            api_url: "https://pokeapi.co/api/v2".to_string(),
            ..Config::default()
        };
        assert_eq!(
            with_slash.endpoint("pokemon", "pikachu").unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
        assert_eq!(
            without_slash.endpoint("move", "25").unwrap().as_str(),
            "https://pokeapi.co/api/v2/move/25"
        );
    }

    #[rstest]
    #[case("pikachu?not-a-real-pokemon", "pikachu%3Fnot-a-real-pokemon")]
    #[case("pikachu#fragment", "pikachu%23fragment")]
    #[case("pikachu/extra", "pikachu%2Fextra")]
    #[case("mr mime", "mr%20mime")]
    fn test_endpoint_keeps_identifier_in_one_segment(#[case] identifier: &str, #[case] encoded: &str) {
        let url = Config::default().endpoint("pokemon", identifier).unwrap();

        assert_eq!(url.path(), format!("/api/v2/pokemon/{}", encoded));
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_unparseable_api_url_fails_validation() {
        let config = Config {
            api_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(PokedexError::Config(_))));
    }
}
