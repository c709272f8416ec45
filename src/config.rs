use anyhow::{Context, Result};

pub const DEFAULT_SUNSET_API_URL: &str = "https://api.sunrisesunset.io/json";
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "https://simple-smart-hub-client.netlify.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Base URL of the sunrise/sunset API, without query string.
    pub sunset_api_url: String,
    /// Upper bound for a single sunset lookup, in seconds.
    pub sunset_timeout_secs: u64,
    /// The only browser origin allowed by CORS.
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            sunset_api_url: optional("SUNSET_API_URL", DEFAULT_SUNSET_API_URL),
            sunset_timeout_secs: parse_timeout(&optional("SUNSET_TIMEOUT_SECS", "10"))?,
            cors_allowed_origin: optional("CORS_ALLOWED_ORIGIN", DEFAULT_CORS_ALLOWED_ORIGIN),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    let secs: u64 = raw
        .trim()
        .parse()
        .context("SUNSET_TIMEOUT_SECS must be a positive integer")?;
    anyhow::ensure!(secs > 0, "SUNSET_TIMEOUT_SECS must be greater than zero");
    Ok(secs)
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing required env var: {key}"))
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
