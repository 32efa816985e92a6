//! Application configuration.
//!
//! Values come from variables named below. Native builds read the process
//! environment; the browser build reads the values baked in at compile time.
//! Both paths share one parser so they cannot drift.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
/// Route that receives redirect-mode OAuth callbacks.
pub const CALLBACK_PATH: &str = "/auth/callback";

const GOOGLE_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
const GOOGLE_REDIRECT_URI: &str = "GOOGLE_REDIRECT_URI";
const API_BASE_URL: &str = "API_BASE_URL";
const APP_NAME: &str = "APP_NAME";
const APP_VERSION: &str = "APP_VERSION";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing config: {var} not set")]
    Missing { var: &'static str },

    /// A variable is set but unusable.
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub google_client_id: String,
    /// Explicit OAuth redirect URI; derived from the page origin when unset.
    pub google_redirect_uri: Option<String>,
    /// Single source of truth for the backend location. Absolute, or a path
    /// resolved against the page origin.
    pub api_base_url: String,
    pub app_name: String,
    pub app_version: String,
}

impl AppConfig {
    /// Build typed config from a variable lookup.
    ///
    /// Required:
    /// - `GOOGLE_CLIENT_ID`
    ///
    /// Optional:
    /// - `GOOGLE_REDIRECT_URI`: absolute URL, default `{origin}/auth/callback`
    /// - `API_BASE_URL`: absolute URL or `/path`, default `/api`
    /// - `APP_NAME`, `APP_VERSION`: default to the crate name and version
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the client id is missing or a URL is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let google_client_id = get(GOOGLE_CLIENT_ID).ok_or(ConfigError::Missing { var: GOOGLE_CLIENT_ID })?;

        let google_redirect_uri = get(GOOGLE_REDIRECT_URI)
            .map(|raw| {
                url::Url::parse(&raw)
                    .map(|_| raw)
                    .map_err(|e| ConfigError::Invalid { var: GOOGLE_REDIRECT_URI, reason: e.to_string() })
            })
            .transpose()?;

        let api_base_url = parse_base_url(get(API_BASE_URL).as_deref().unwrap_or(DEFAULT_API_BASE_URL))?;

        Ok(Self {
            google_client_id,
            google_redirect_uri,
            api_base_url,
            app_name: get(APP_NAME).unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned()),
            app_version: get(APP_VERSION).unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned()),
        })
    }

    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from values captured at compile time.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                GOOGLE_CLIENT_ID => option_env!("GOOGLE_CLIENT_ID"),
                GOOGLE_REDIRECT_URI => option_env!("GOOGLE_REDIRECT_URI"),
                API_BASE_URL => option_env!("API_BASE_URL"),
                APP_NAME => option_env!("APP_NAME"),
                APP_VERSION => option_env!("APP_VERSION"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// The redirect URI sent with every login request.
    #[must_use]
    pub fn redirect_uri(&self, origin: &str) -> String {
        self.google_redirect_uri
            .clone()
            .unwrap_or_else(|| format!("{}{CALLBACK_PATH}", origin.trim_end_matches('/')))
    }

    /// The backend base URL as an absolute URL.
    #[must_use]
    pub fn resolved_api_base_url(&self, origin: &str) -> String {
        if is_absolute(&self.api_base_url) {
            self.api_base_url.clone()
        } else {
            format!("{}{}", origin.trim_end_matches('/'), self.api_base_url)
        }
    }
}

fn is_absolute(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    if is_absolute(trimmed) {
        url::Url::parse(trimmed).map_err(|e| ConfigError::Invalid { var: API_BASE_URL, reason: e.to_string() })?;
        Ok(trimmed.to_owned())
    } else if trimmed.starts_with('/') || trimmed.is_empty() {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::Invalid {
            var: API_BASE_URL,
            reason: format!("expected an absolute URL or a path starting with '/', got '{raw}'"),
        })
    }
}
