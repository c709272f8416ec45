use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    control::ActuationState,
    db::models::{SensorData, Settings},
    duration::format_time_of_day,
    sensors::SensorDataInput,
    settings::SettingsInput,
};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Request body for `PUT /settings`. Any `light_time_off` sent by the client
/// is ignored; it is always derived from `user_light` and `light_duration`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SettingsRequest {
    /// Fan-on threshold, degrees Celsius.
    pub user_temp: Option<f64>,
    /// `"sunset"` or a time of day `HH:MM:SS`.
    #[schema(example = "sunset")]
    pub user_light: Option<String>,
    /// How long the light stays on, e.g. `"1h30m"`. Required with `user_light`.
    #[schema(example = "1h30m")]
    pub light_duration: Option<String>,
}

impl From<SettingsRequest> for SettingsInput {
    fn from(r: SettingsRequest) -> Self {
        Self {
            user_temp: r.user_temp,
            user_light: r.user_light,
            light_duration: r.light_duration,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettingsDto {
    pub id: Uuid,
    pub user_temp: Option<f64>,
    pub user_light: Option<String>,
    /// `HH:MM:SS`
    #[schema(example = "19:30:00")]
    pub light_time_off: Option<String>,
}

impl From<Settings> for SettingsDto {
    fn from(s: Settings) -> Self {
        Self {
            id: s.id,
            user_temp: s.user_temp,
            user_light: s.user_light,
            light_time_off: s.light_time_off.map(format_time_of_day),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor data
// ---------------------------------------------------------------------------

/// Request body for `POST /sensorData`. The reading's time is assigned by the
/// server; a `datetime` field in the body is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SensorDataRequest {
    /// Degrees Celsius. The device firmware sends this as `temp`.
    #[serde(alias = "temp")]
    pub temperature: Option<f64>,
    pub presence: Option<bool>,
}

impl From<SensorDataRequest> for SensorDataInput {
    fn from(r: SensorDataRequest) -> Self {
        Self {
            temperature: r.temperature,
            presence: r.presence,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SensorDataDto {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: Option<f64>,
    pub presence: Option<bool>,
    /// Server-local `HH:MM:SS` at which the reading was stored.
    #[schema(example = "18:42:07")]
    pub datetime: String,
}

impl From<SensorData> for SensorDataDto {
    fn from(r: SensorData) -> Self {
        Self {
            id: r.id,
            temperature: r.temperature,
            presence: r.presence,
            datetime: format_time_of_day(r.datetime),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuation
// ---------------------------------------------------------------------------

/// Response for `GET /sensorData`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActuationDto {
    /// Latest reading reported someone present.
    pub presence: bool,
    /// Latest temperature is at or above `user_temp`.
    pub fan: bool,
    /// `user_light` equals the latest reading's time exactly.
    pub light: bool,
    /// Same value as `light`, under the key the device firmware reads.
    pub led_pin: bool,
    /// A stored reading exists at the scheduled light-on time.
    pub light_on_logged: bool,
    /// A stored reading exists at `light_time_off`.
    pub light_off_logged: bool,
}

impl From<ActuationState> for ActuationDto {
    fn from(s: ActuationState) -> Self {
        Self {
            presence: s.presence,
            fan: s.fan,
            light: s.light,
            led_pin: s.light,
            light_on_logged: s.light_on_logged,
            light_off_logged: s.light_off_logged,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde_json::json;

    use super::*;

    #[test]
    fn settings_dto_omits_duration_and_formats_time() {
        let dto = SettingsDto::from(Settings {
            id: Uuid::nil(),
            user_temp: Some(26.5),
            user_light: Some("sunset".into()),
            light_time_off: NaiveTime::from_hms_opt(19, 30, 0),
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["light_time_off"], "19:30:00");
        assert!(json.get("light_duration").is_none());
    }

    #[test]
    fn sensor_request_accepts_firmware_temp_key() {
        let req: SensorDataRequest =
            serde_json::from_value(json!({ "temp": 24.5, "presence": true })).unwrap();
        assert_eq!(req.temperature, Some(24.5));
        assert_eq!(req.presence, Some(true));
    }

    #[test]
    fn sensor_request_ignores_datetime() {
        let req: SensorDataRequest =
            serde_json::from_value(json!({ "temperature": 20.0, "datetime": "01:02:03" }))
                .unwrap();
        assert_eq!(req.temperature, Some(20.0));
        assert_eq!(req.presence, None);
    }

    #[test]
    fn actuation_dto_mirrors_light_as_led_pin() {
        let json = serde_json::to_value(ActuationDto::from(ActuationState {
            presence: true,
            light: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(json["light"], true);
        assert_eq!(json["led_pin"], true);
    }

    #[test]
    fn actuation_dto_serializes_every_flag() {
        let dto = ActuationDto::from(ActuationState {
            presence: true,
            fan: true,
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({
                "presence": true,
                "fan": true,
                "light": false,
                "led_pin": false,
                "light_on_logged": false,
                "light_off_logged": false,
            })
        );
    }
}
