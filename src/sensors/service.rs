use chrono::{Local, NaiveTime, Timelike};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{db::models::SensorData, error::Result};

/// A reading as submitted by the device. Its time of day is always assigned
/// by the server.
#[derive(Debug, Clone, Default)]
pub struct SensorDataInput {
    pub temperature: Option<f64>,
    pub presence: Option<bool>,
}

pub struct SensorService {
    pool: PgPool,
}

impl SensorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stamps `input` with the current server-local time and appends it.
    pub async fn create(&self, input: SensorDataInput) -> Result<SensorData> {
        self.create_at(input, now_time_of_day()).await
    }

    pub(crate) async fn create_at(
        &self,
        input: SensorDataInput,
        datetime: NaiveTime,
    ) -> Result<SensorData> {
        let reading = sqlx::query_as::<_, SensorData>(
            r#"
            INSERT INTO sensor_data (temperature, presence, datetime)
            VALUES ($1, $2, $3)
            RETURNING id, temperature, presence, datetime
            "#,
        )
        .bind(input.temperature)
        .bind(input.presence)
        .bind(datetime)
        .fetch_one(&self.pool)
        .await?;

        info!(
            id = %reading.id,
            temperature = ?reading.temperature,
            presence = ?reading.presence,
            datetime = %reading.datetime,
            "Sensor reading stored"
        );
        Ok(reading)
    }

    /// Readings in insertion order, at most `limit` of them when given.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<SensorData>> {
        debug!(limit = ?limit, "Listing sensor readings");

        let rows = sqlx::query_as::<_, SensorData>(
            r#"
            SELECT id, temperature, presence, datetime
            FROM sensor_data
            ORDER BY seq ASC
            LIMIT $1
            "#,
        )
        .bind(limit.map(i64::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The most recently inserted reading.
    pub async fn latest(&self) -> Result<Option<SensorData>> {
        let row = sqlx::query_as::<_, SensorData>(
            r#"
            SELECT id, temperature, presence, datetime
            FROM sensor_data
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Whether any stored reading was taken at exactly `time`.
    pub async fn exists_at(&self, time: NaiveTime) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM sensor_data WHERE datetime = $1)",
        )
        .bind(time)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

/// Server-local wall-clock time, truncated to whole seconds.
pub(crate) fn now_time_of_day() -> NaiveTime {
    let now = Local::now().time();
    now.with_nanosecond(0).unwrap_or(now)
}
