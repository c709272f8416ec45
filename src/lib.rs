pub mod api;
pub mod config;
pub mod control;
pub mod db;
pub mod duration;
pub mod error;
pub mod sensors;
pub mod settings;
pub mod sunset;
