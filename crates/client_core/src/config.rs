use std::{collections::HashMap, fs, path::Path};

use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
pub const API_BASE_ENV: &str = "EVENTS_API_BASE";
pub const API_BASE_ENV_ALT: &str = "APP__API_BASE";
pub const CONFIG_FILE: &str = "events_client.toml";

/// Backend location, resolved once at startup and handed to every client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|err| ClientError::Config(format!("invalid api base '{trimmed}': {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "api base '{trimmed}' must use http or https"
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn orgs_url(&self) -> String {
        format!("{}/orgs", self.base_url)
    }

    pub fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    pub fn event_url(&self, id: shared::domain::EventId) -> String {
        format!("{}/events/{}", self.base_url, id.0)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Candidate base URLs in priority order. Empty values are skipped.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub explicit: Option<String>,
    pub build_time: Option<String>,
    pub runtime_env: Option<String>,
    pub file: Option<String>,
}

impl ConfigSources {
    /// Gathers every source visible to this process, with `explicit` taking precedence.
    pub fn gather(explicit: Option<String>) -> Self {
        let runtime_env = std::env::var(API_BASE_ENV)
            .ok()
            .or_else(|| std::env::var(API_BASE_ENV_ALT).ok());
        Self {
            explicit,
            build_time: option_env!("EVENTS_API_BASE").map(str::to_string),
            runtime_env,
            file: read_file_api_base(Path::new(CONFIG_FILE)),
        }
    }

    pub fn resolve(&self) -> Result<ApiConfig, ClientError> {
        let chosen = [
            ("explicit", &self.explicit),
            ("build-time", &self.build_time),
            ("environment", &self.runtime_env),
            ("config file", &self.file),
        ]
        .into_iter()
        .find_map(|(source, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (source, v))
        });

        match chosen {
            Some((source, value)) => {
                tracing::debug!(source, base_url = value, "resolved api base");
                ApiConfig::new(value)
            }
            None => {
                tracing::debug!(base_url = DEFAULT_API_BASE, "using default api base");
                Ok(ApiConfig::default())
            }
        }
    }
}

pub fn load_api_config(explicit: Option<String>) -> Result<ApiConfig, ClientError> {
    ConfigSources::gather(explicit).resolve()
}

fn read_file_api_base(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    match toml::from_str::<HashMap<String, String>>(&raw) {
        Ok(file_cfg) => file_cfg.get("api_base").cloned(),
        Err(err) => {
            tracing::warn!("ignoring malformed {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
