mod service;

pub use service::{ActuationState, ControlService};
