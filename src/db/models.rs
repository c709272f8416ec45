use chrono::NaiveTime;
use sqlx::FromRow;
use uuid::Uuid;

/// The singleton settings row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Settings {
    pub id: Uuid,
    /// Fan-on threshold, degrees Celsius.
    pub user_temp: Option<f64>,
    /// `"sunset"` or an explicit `HH:MM:SS`.
    pub user_light: Option<String>,
    pub light_time_off: Option<NaiveTime>,
}

/// A settings row as returned by the upsert statement.
#[derive(Debug, FromRow)]
pub struct UpsertedSettings {
    #[sqlx(flatten)]
    pub settings: Settings,
    /// `true` when the row did not exist before the statement ran.
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SensorData {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: Option<f64>,
    pub presence: Option<bool>,
    /// Server-local time of day the reading was stored.
    pub datetime: NaiveTime,
}
