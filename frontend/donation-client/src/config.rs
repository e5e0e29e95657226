// frontend/donation-client/src/config.rs
//
// Backend location, resolved once per process:
//   1. explicit override (CLI --backend-url)
//   2. BACKEND_URL
//   3. DEPLOY_ENV=production -> deployed backend, otherwise local Flask dev server

use std::env;

use tracing::{info, warn};
use url::Url;

use crate::error::ConfigError;

pub const LOCAL_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const PRODUCTION_BACKEND_URL: &str = "https://jerry23py-github-io.onrender.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub backend_url: Url,
}

impl Config {
    /// Read `.env` (if any) and the process environment.
    pub fn load(override_url: Option<&str>) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Failed to read .env: {e}");
            }
        }

        Self::resolve(
            override_url,
            var("BACKEND_URL").as_deref(),
            var("DEPLOY_ENV").as_deref(),
        )
    }

    pub fn resolve(
        override_url: Option<&str>,
        backend_url: Option<&str>,
        deploy_env: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let raw = match (override_url, backend_url) {
            (Some(url), _) => url,
            (None, Some(url)) => url,
            (None, None) if is_production(deploy_env) => PRODUCTION_BACKEND_URL,
            (None, None) => {
                info!("BACKEND_URL not set, using default: {LOCAL_BACKEND_URL}");
                LOCAL_BACKEND_URL
            }
        };

        let backend_url = parse_base(raw.trim())?;
        info!(backend_url = %backend_url, "Backend resolved");
        Ok(Self { backend_url })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn is_production(deploy_env: Option<&str>) -> bool {
    deploy_env.is_some_and(|v| v.trim().eq_ignore_ascii_case("production"))
}

fn parse_base(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        value: raw.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::OpaqueUrl(raw.to_string()));
    }

    Ok(url)
}
