//! Server configuration parsed from environment variables.
//!
//! Parsing goes through a lookup function so tests can feed a map instead of
//! mutating the process environment.

use std::time::Duration;

use crate::services::identity::OAuthProviders;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ARTICLES_COLLECTION: &str = "articles";
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://firebasestorage.googleapis.com/v0";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_SECURETOKEN_BASE_URL: &str = "https://securetoken.googleapis.com/v1";
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

const FIREBASE_REQUIRED: [&str; 3] = ["FIREBASE_PROJECT_ID", "FIREBASE_API_KEY", "FIREBASE_STORAGE_BUCKET"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to something that does not parse.
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },

    /// Part of a variable group was set but this member is missing.
    #[error("missing env var {0}")]
    Missing(String),
}

/// Base URLs of the managed backend services. Overridable for emulators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoints {
    pub firestore: String,
    pub storage: String,
    pub identity: String,
    pub securetoken: String,
}

impl Default for BackendEndpoints {
    fn default() -> Self {
        Self {
            firestore: DEFAULT_FIRESTORE_BASE_URL.to_owned(),
            storage: DEFAULT_STORAGE_BASE_URL.to_owned(),
            identity: DEFAULT_IDENTITY_BASE_URL.to_owned(),
            securetoken: DEFAULT_SECURETOKEN_BASE_URL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl BackendTimeouts {
    /// Shared client for outbound calls with these timeouts applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request())
            .connect_timeout(self.connect())
            .build()
    }

    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

/// Connection settings for the Firebase project that holds the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub api_key: String,
    pub storage_bucket: String,
    pub articles_collection: String,
    pub endpoints: BackendEndpoints,
}

impl FirebaseConfig {
    /// Build from a variable lookup.
    ///
    /// Required (all or none):
    /// - `FIREBASE_PROJECT_ID`, `FIREBASE_API_KEY`, `FIREBASE_STORAGE_BUCKET`
    ///
    /// Optional:
    /// - `FIREBASE_ARTICLES_COLLECTION`: default `articles`
    /// - `FIRESTORE_BASE_URL`, `STORAGE_BASE_URL`, `IDENTITY_BASE_URL`, `SECURETOKEN_BASE_URL`
    ///
    /// Returns `Ok(None)` when none of the required variables are set.
    ///
    /// # Errors
    ///
    /// Returns an error when only some required variables are set.
    pub fn from_lookup<F>(lookup: &F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values: Vec<Option<String>> = FIREBASE_REQUIRED
            .iter()
            .map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
            .collect();
        if values.iter().all(Option::is_none) {
            return Ok(None);
        }
        let mut required = Vec::with_capacity(FIREBASE_REQUIRED.len());
        for (key, value) in FIREBASE_REQUIRED.iter().zip(values) {
            required.push(value.ok_or_else(|| ConfigError::Missing((*key).to_owned()))?);
        }
        let [project_id, api_key, storage_bucket]: [String; 3] = required
            .try_into()
            .map_err(|_| ConfigError::Missing(FIREBASE_REQUIRED[0].to_owned()))?;

        let base_url = |key: &str, default: &str| {
            lookup(key)
                .unwrap_or_else(|| default.to_owned())
                .trim_end_matches('/')
                .to_owned()
        };
        let endpoints = BackendEndpoints {
            firestore: base_url("FIRESTORE_BASE_URL", DEFAULT_FIRESTORE_BASE_URL),
            storage: base_url("STORAGE_BASE_URL", DEFAULT_STORAGE_BASE_URL),
            identity: base_url("IDENTITY_BASE_URL", DEFAULT_IDENTITY_BASE_URL),
            securetoken: base_url("SECURETOKEN_BASE_URL", DEFAULT_SECURETOKEN_BASE_URL),
        };

        Ok(Some(Self {
            project_id,
            api_key,
            storage_bucket,
            articles_collection: lookup("FIREBASE_ARTICLES_COLLECTION")
                .unwrap_or_else(|| DEFAULT_ARTICLES_COLLECTION.to_owned()),
            endpoints,
        }))
    }
}

/// Everything the gateway needs at start-up.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub cookie_secure: bool,
    /// Applies to every outbound HTTP call.
    pub timeouts: BackendTimeouts,
    /// `None` disables the backend routes; the shell is still served.
    pub firebase: Option<FirebaseConfig>,
    pub oauth: OAuthProviders,
}

impl ServerConfig {
    /// Build from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is malformed.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT".to_owned(), value: raw })?,
            None => DEFAULT_PORT,
        };
        let oauth = OAuthProviders::from_lookup(lookup);
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => {
                parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE".to_owned(), value: raw })?
            }
            None => oauth.any_https_redirect(),
        };
        let timeouts = BackendTimeouts {
            request_secs: parse_u64(lookup, "BACKEND_REQUEST_TIMEOUT_SECS", DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(lookup, "BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS)?,
        };
        let firebase = FirebaseConfig::from_lookup(lookup)?;
        Ok(Self { port, cookie_secure, timeouts, firebase, oauth })
    }
}

/// Parse the usual spellings of a boolean flag.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { key: key.to_owned(), value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
