use anyhow::{Context, Result};
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset → in-process memory store.
    pub redis_url: Option<String>,
    /// Origin used for embed links and the SDK snippet.
    pub public_base_url: Url,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let public_base_url = optional_env("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        Ok(Config {
            redis_url: optional_env("REDIS_URL"),
            public_base_url: Url::parse(&public_base_url)
                .with_context(|| format!("PUBLIC_BASE_URL '{public_base_url}' is not a valid URL"))?,
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
