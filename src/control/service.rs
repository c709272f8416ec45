use tracing::info;

use crate::{
    db::models::{SensorData, Settings},
    duration::{format_time_of_day, parse_time_of_day},
    error::{Error, Result},
    sensors::SensorService,
    settings::SettingsService,
};

/// What the device should do right now, plus the schedule lookups that went
/// into it.
///
/// Only `fan` follows a clear rule. `light` is a literal comparison of the
/// configured `user_light` against the latest reading's time, and the two
/// `*_logged` flags only report whether a reading exists at the scheduled
/// on/off times; how they should combine into a light command is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuationState {
    pub presence: bool,
    pub fan: bool,
    pub light: bool,
    pub light_on_logged: bool,
    pub light_off_logged: bool,
}

/// Fan and light decisions that need nothing beyond the two rows.
pub(crate) fn decide(reading: &SensorData, settings: &Settings) -> ActuationState {
    if reading.presence != Some(true) {
        return ActuationState::default();
    }

    let fan = match (reading.temperature, settings.user_temp) {
        (Some(temperature), Some(threshold)) => temperature >= threshold,
        _ => false,
    };
    let taken_at = format_time_of_day(reading.datetime);
    let light = settings.user_light.as_deref() == Some(taken_at.as_str());

    ActuationState {
        presence: true,
        fan,
        light,
        ..ActuationState::default()
    }
}

pub struct ControlService {
    sensors: SensorService,
    settings: SettingsService,
}

impl ControlService {
    pub fn new(sensors: SensorService, settings: SettingsService) -> Self {
        Self { sensors, settings }
    }

    /// Evaluates the latest reading against the stored settings.
    pub async fn evaluate(&self) -> Result<ActuationState> {
        let reading = self
            .sensors
            .latest()
            .await?
            .ok_or_else(|| Error::NotFound("no sensor readings have been recorded".to_owned()))?;
        let settings = self
            .settings
            .current()
            .await?
            .ok_or_else(|| Error::NotFound("settings have not been configured".to_owned()))?;

        let mut state = decide(&reading, &settings);

        if state.presence {
            // "sunset" and other non-times simply never match a reading.
            if let Some(on) = settings
                .user_light
                .as_deref()
                .and_then(|raw| parse_time_of_day(raw).ok())
            {
                state.light_on_logged = self.sensors.exists_at(on).await?;
            }
            if let Some(off) = settings.light_time_off {
                state.light_off_logged = self.sensors.exists_at(off).await?;
            }
        }

        info!(
            reading_id = %reading.id,
            presence = state.presence,
            fan = state.fan,
            light = state.light,
            light_on_logged = state.light_on_logged,
            light_off_logged = state.light_off_logged,
            "Actuation evaluated"
        );
        Ok(state)
    }
}
