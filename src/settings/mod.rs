mod service;

pub use service::{light_time_off, LightSchedule, SettingsInput, SettingsService, UpsertOutcome, SUNSET};
