//! Startup configuration: defaults, optional TOML file, environment overrides

use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "movie-search.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub image_base_url: String,
    pub access_token: Option<String>,
    pub language: String,
    pub include_adult: bool,
    pub toast_ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org/3".into(),
            image_base_url: "https://image.tmdb.org/t/p".into(),
            access_token: None,
            language: "en-US".into(),
            include_adult: false,
            toast_ttl_secs: 4,
        }
    }
}

/// Shape of `movie-search.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_base_url: Option<String>,
    image_base_url: Option<String>,
    access_token: Option<String>,
    language: Option<String>,
    include_adult: Option<bool>,
    toast_ttl_secs: Option<u64>,
}

impl Settings {
    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    fn apply_file(&mut self, file: FileSettings) {
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.image_base_url {
            self.image_base_url = v;
        }
        if let Some(v) = file.access_token {
            self.access_token = Some(v);
        }
        if let Some(v) = file.language {
            self.language = v;
        }
        if let Some(v) = file.include_adult {
            self.include_adult = v;
        }
        if let Some(v) = file.toast_ttl_secs {
            self.toast_ttl_secs = v;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("TMDB_TOKEN") {
            self.access_token = Some(v);
        }
        if let Some(v) = env("TMDB_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = env("TMDB_LANGUAGE") {
            self.language = v;
        }
        if let Some(v) = env("TMDB_INCLUDE_ADULT") {
            match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.include_adult = true,
                "0" | "false" | "no" => self.include_adult = false,
                other => tracing::warn!(value = other, "Ignoring invalid TMDB_INCLUDE_ADULT"),
            }
        }
    }

    /// Blank tokens are treated as absent, trailing slashes are dropped from URLs.
    fn normalize(mut self) -> Self {
        self.access_token = self
            .access_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.image_base_url = self.image_base_url.trim_end_matches('/').to_string();
        self
    }
}

fn parse_file(raw: &str) -> anyhow::Result<FileSettings> {
    toml::from_str(raw).context("invalid config file")
}

fn load_file(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_file(&raw).map(Some)
}

/// Build settings from an optional config file body and an environment lookup.
fn resolve(file: Option<FileSettings>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();
    if let Some(file) = file {
        settings.apply_file(file);
    }
    settings.apply_env(env);
    settings.normalize()
}

pub fn load_settings() -> Settings {
    let path = std::env::var("MOVIE_SEARCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());

    let file = match load_file(Path::new(&path)) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Ignoring config file");
            None
        }
    };

    resolve(file, |key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = resolve(None, env_from(&[]));
        assert_eq!(settings, Settings::default());
        assert!(!settings.has_token());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = parse_file(
            r#"
            api_base_url = "http://localhost:9000/3/"
            language = "de-DE"
            include_adult = true
            toast_ttl_secs = 10
            "#,
        )
        .unwrap();

        let settings = resolve(Some(file), env_from(&[]));
        assert_eq!(settings.api_base_url, "http://localhost:9000/3");
        assert_eq!(settings.language, "de-DE");
        assert!(settings.include_adult);
        assert_eq!(settings.toast_ttl_secs, 10);
    }

    #[test]
    fn env_overrides_file() {
        let file = parse_file(r#"access_token = "from-file""#).unwrap();
        let settings = resolve(
            Some(file),
            env_from(&[("TMDB_TOKEN", "from-env"), ("TMDB_INCLUDE_ADULT", "no")]),
        );
        assert_eq!(settings.access_token.as_deref(), Some("from-env"));
        assert!(!settings.include_adult);
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let settings = resolve(None, env_from(&[("TMDB_TOKEN", "   ")]));
        assert!(settings.access_token.is_none());
    }

    #[test]
    fn invalid_include_adult_keeps_previous_value() {
        let settings = resolve(None, env_from(&[("TMDB_INCLUDE_ADULT", "maybe")]));
        assert!(!settings.include_adult);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(parse_file("include_adult = \"sure\"").is_err());
    }
}
