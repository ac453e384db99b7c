//! Resolver defaults loaded from YAML, with `${VAR}` / `${VAR:default}`
//! expansion from the environment (and `.env`, when present).
//!
//! ```yaml
//! locale: ${APP_LOCALE:en}
//! default_locale: en
//! fallback: "…"
//! silent: false
//! ```

use dotenvy::dotenv;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

use crate::options::ResolutionOptions;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Values every resolution of a host shares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    pub locale: Option<String>,
    #[serde(alias = "defaultLocale")]
    pub default_locale: Option<String>,
    pub fallback: Option<String>,
    pub silent: bool,
}

impl ResolverSettings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        let expanded = expand_env(yaml);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Options pre-filled from these settings; the caller adds `content`,
    /// `plural` and `replacements`.
    pub fn options<'a>(&self) -> ResolutionOptions<'a> {
        ResolutionOptions {
            locale: self.locale.clone(),
            default_locale: self.default_locale.clone(),
            fallback: self.fallback.clone(),
            silent: self.silent,
            ..ResolutionOptions::default()
        }
    }
}

fn expand_env(yaml: &str) -> String {
    // a missing .env file is normal outside development
    let _ = dotenv();

    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Z0-9_]+)(?::([^\}]*))?\}").expect("Invalid regex pattern")
    });

    re.replace_all(yaml, |caps: &regex::Captures<'_>| {
        env::var(&caps[1])
            .unwrap_or_else(|_| caps.get(2).map_or("", |m| m.as_str()).to_string())
    })
    .into_owned()
}

/// Embeds a settings file at compile time and parses it.
#[macro_export]
macro_rules! include_settings {
    ($path:expr) => {
        $crate::settings::ResolverSettings::from_yaml_str(include_str!($path))
    };
}
