use chrono::{NaiveTime, TimeDelta};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    db::models::{Settings, UpsertedSettings},
    duration::{parse_duration, parse_time_of_day, ParseError},
    error::{Error, Result},
    sunset::SharedSunsetSource,
};

/// Literal `user_light` value meaning "switch on at today's sunset".
pub const SUNSET: &str = "sunset";

/// Settings as submitted by a client. `light_duration` only feeds the
/// computation of `light_time_off` and is never stored.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub user_temp: Option<f64>,
    pub user_light: Option<String>,
    pub light_duration: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// When the light should switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightSchedule {
    Sunset,
    At(NaiveTime),
}

impl LightSchedule {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if raw == SUNSET {
            Ok(Self::Sunset)
        } else {
            parse_time_of_day(raw).map(Self::At)
        }
    }
}

/// `light_on + duration` on a 24-hour clock; times past midnight wrap around.
pub fn light_time_off(light_on: NaiveTime, duration: TimeDelta) -> NaiveTime {
    light_on.overflowing_add_signed(duration).0
}

pub struct SettingsService {
    pool: PgPool,
    sunset: SharedSunsetSource,
}

impl SettingsService {
    pub fn new(pool: PgPool, sunset: SharedSunsetSource) -> Self {
        Self { pool, sunset }
    }

    /// Validates `input`, derives `light_time_off` and writes the singleton
    /// settings row in a single statement.
    pub async fn upsert(&self, input: SettingsInput) -> Result<(Settings, UpsertOutcome)> {
        let duration = input
            .light_duration
            .as_deref()
            .map(parse_duration)
            .transpose()?;
        let schedule = input
            .user_light
            .as_deref()
            .map(LightSchedule::parse)
            .transpose()?;

        let time_off = match (schedule, duration) {
            (None, _) => None,
            (Some(_), None) => {
                return Err(Error::Validation(
                    "light_duration is required when user_light is set".to_owned(),
                ))
            }
            (Some(schedule), Some(duration)) => {
                let light_on = self.resolve(schedule).await?;
                Some(light_time_off(light_on, duration))
            }
        };

        let row = sqlx::query_as::<_, UpsertedSettings>(
            r#"
            INSERT INTO settings (user_temp, user_light, light_time_off)
            VALUES ($1, $2, $3)
            ON CONFLICT (singleton) DO UPDATE
                SET user_temp      = EXCLUDED.user_temp,
                    user_light     = EXCLUDED.user_light,
                    light_time_off = EXCLUDED.light_time_off,
                    updated_at     = now()
            RETURNING id, user_temp, user_light, light_time_off,
                      (xmax = 0) AS created
            "#,
        )
        .bind(input.user_temp)
        .bind(input.user_light.as_deref())
        .bind(time_off)
        .fetch_one(&self.pool)
        .await?;

        let outcome = if row.created {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        };

        info!(
            outcome = ?outcome,
            user_light = ?row.settings.user_light,
            light_time_off = ?row.settings.light_time_off,
            "Settings saved"
        );
        Ok((row.settings, outcome))
    }

    /// The stored settings, if any have been written yet.
    pub async fn current(&self) -> Result<Option<Settings>> {
        let row = sqlx::query_as::<_, Settings>(
            r#"
            SELECT id, user_temp, user_light, light_time_off
            FROM settings
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn resolve(&self, schedule: LightSchedule) -> Result<NaiveTime> {
        match schedule {
            LightSchedule::At(time) => Ok(time),
            LightSchedule::Sunset => {
                debug!("Resolving light-on time from sunset");
                Ok(self.sunset.sunset().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn schedule_parses_sunset_literal() {
        assert_eq!(LightSchedule::parse("sunset").unwrap(), LightSchedule::Sunset);
    }

    #[test]
    fn schedule_parses_explicit_time() {
        assert_eq!(
            LightSchedule::parse("20:00:00").unwrap(),
            LightSchedule::At(hms(20, 0, 0))
        );
    }

    #[test]
    fn schedule_is_case_sensitive() {
        assert!(LightSchedule::parse("Sunset").is_err());
    }

    #[test]
    fn schedule_rejects_unpadded_and_leap_times() {
        for raw in ["8:00:00", " 20:00:00", "20:0:0", "23:59:60"] {
            assert!(LightSchedule::parse(raw).is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn light_time_off_adds_duration() {
        let d = parse_duration("2h30m").unwrap();
        assert_eq!(light_time_off(hms(20, 0, 0), d), hms(22, 30, 0));
    }

    #[test]
    fn light_time_off_wraps_past_midnight() {
        let d = parse_duration("1h").unwrap();
        assert_eq!(light_time_off(hms(23, 30, 0), d), hms(0, 30, 0));
    }

    #[test]
    fn light_time_off_wraps_multiple_days() {
        let d = parse_duration("49h").unwrap();
        assert_eq!(light_time_off(hms(6, 0, 0), d), hms(7, 0, 0));
    }
}
