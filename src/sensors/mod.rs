mod service;

pub use service::{SensorDataInput, SensorService};
