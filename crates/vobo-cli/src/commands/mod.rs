//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod doctor;
pub mod process;
pub mod register;

use std::path::Path;

use tracing::debug;

use vobo_core::VoboConfig;

/// Resolve the effective configuration: an explicit `--config` path wins,
/// then the per-user config file if it exists, then built-in defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<VoboConfig> {
    if let Some(path) = explicit {
        return Ok(VoboConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("loading config from {}", default_path.display());
        return Ok(VoboConfig::from_file(&default_path)?);
    }

    Ok(VoboConfig::default())
}
