pub mod models;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{NaiveTime, Timelike};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

use self::models::SunsetResponse;

/// Latitude of the hub's location (Kingston, Jamaica).
pub const LATITUDE: f64 = 17.97787;
/// Longitude of the hub's location.
pub const LONGITUDE: f64 = -76.77339;

#[derive(Debug, Error)]
pub enum SunsetError {
    #[error("sunset API request timed out")]
    Timeout,

    #[error("sunset API request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("sunset API returned an unexpected body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("sunset API returned an unreadable time: {0:?}")]
    Time(String),
}

impl From<reqwest::Error> for SunsetError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(e)
        }
    }
}

/// Resolves today's sunset to a local time of day.
#[async_trait]
pub trait SunsetSource: Send + Sync {
    async fn sunset(&self) -> Result<NaiveTime, SunsetError>;
}

pub type SharedSunsetSource = Arc<dyn SunsetSource>;

#[derive(Debug, Clone)]
pub struct SunsetClient {
    http: Client,
    base_url: String,
}

impl SunsetClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.sunset_timeout_secs))
            .build()
            .context("Failed to build sunset HTTP client")?;

        Ok(Self {
            http,
            base_url: config.sunset_api_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl SunsetSource for SunsetClient {
    async fn sunset(&self) -> Result<NaiveTime, SunsetError> {
        let url = format!("{}?lat={LATITUDE}&lng={LONGITUDE}", self.base_url);
        debug!(url = %url, "Requesting sunset time");

        let bytes = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let resp = serde_json::from_slice::<SunsetResponse>(&bytes)?;
        let sunset = parse_sunset(&resp.results.sunset)?;

        info!(sunset = %sunset, "Resolved sunset time");
        Ok(sunset)
    }
}

/// Accept both the 24-hour form and the 12-hour form the API actually sends,
/// normalised to whole seconds.
pub(crate) fn parse_sunset(raw: &str) -> Result<NaiveTime, SunsetError> {
    let raw = raw.trim();
    ["%H:%M:%S", "%I:%M:%S %p"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
        .map(|t| t.with_nanosecond(0).unwrap_or(t))
        .ok_or_else(|| SunsetError::Time(raw.to_owned()))
}
