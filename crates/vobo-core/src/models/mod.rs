//! Data models: request records and pipeline configuration.

pub mod config;
pub mod record;
