//! # Backend connection settings — `recipe-vault.toml`
//!
//! The client needs two values: the project URL and the public anon key. They
//! are resolved differently per platform:
//!
//! | Platform | Source |
//! |----------|--------|
//! | Web (WASM) | Baked in at compile time from `SUPABASE_URL` / `SUPABASE_ANON_KEY` via `option_env!`. |
//! | Native | `recipe-vault.toml` in the working directory if present, otherwise the same variables read at runtime (a `.env` file is honoured through `dotenvy`). |
//!
//! ```toml
//! [supabase]
//! url = "https://xyzcompany.supabase.co"
//! anon_key = "public-anon-key"
//! ```

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

const URL_VAR: &str = "SUPABASE_URL";
const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid Supabase URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and as whom the client talks to the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL without a trailing slash.
    pub url: String,
    /// Public anon key, sent as `apikey` on every request.
    pub anon_key: String,
}

#[derive(Deserialize)]
struct ConfigFile {
    supabase: SupabaseConfig,
}

impl SupabaseConfig {
    /// The well-known filename for the native config file.
    pub fn filename() -> &'static str {
        "recipe-vault.toml"
    }

    /// Validate and normalise a URL / key pair.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ConfigError::Missing(URL_VAR));
        }
        if anon_key.trim().is_empty() {
            return Err(ConfigError::Missing(ANON_KEY_VAR));
        }
        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.trim().to_string(),
        })
    }

    /// Parse the `[supabase]` table of a TOML document.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        Self::new(&file.supabase.url, &file.supabase.anon_key)
    }

    /// Values captured when the crate was compiled.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let url = option_env!("SUPABASE_URL").ok_or(ConfigError::Missing(URL_VAR))?;
        let key = option_env!("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing(ANON_KEY_VAR))?;
        Self::new(url, key)
    }

    /// Values from the process environment, after loading `.env`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let url = std::env::var(URL_VAR).map_err(|_| ConfigError::Missing(URL_VAR))?;
        let key = std::env::var(ANON_KEY_VAR).map_err(|_| ConfigError::Missing(ANON_KEY_VAR))?;
        Self::new(&url, &key)
    }

    /// Resolve the configuration for the platform this build targets.
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_build_env()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let path = std::path::Path::new(Self::filename());
            if path.exists() {
                Self::from_toml(&std::fs::read_to_string(path)?)
            } else {
                Self::from_env().or_else(|_| Self::from_build_env())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let config = SupabaseConfig::from_toml(
            r#"
            [supabase]
            url = "https://demo.supabase.co/"
            anon_key = "anon"
            "#,
        )
        .unwrap();
        assert_eq!(config.url, "https://demo.supabase.co");
        assert_eq!(config.anon_key, "anon");
    }

    #[test]
    fn test_missing_section_is_a_parse_error() {
        assert!(matches!(
            SupabaseConfig::from_toml("[other]\nkey = 1\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_values_are_missing() {
        assert!(matches!(
            SupabaseConfig::new("", "anon"),
            Err(ConfigError::Missing("SUPABASE_URL"))
        ));
        assert!(matches!(
            SupabaseConfig::new("https://demo.supabase.co", "  "),
            Err(ConfigError::Missing("SUPABASE_ANON_KEY"))
        ));
    }

    #[test]
    fn test_relative_url_is_rejected() {
        assert!(matches!(
            SupabaseConfig::new("demo.supabase.co", "anon"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
