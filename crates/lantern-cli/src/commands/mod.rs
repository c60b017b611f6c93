//! CLI command implementations

pub mod config;
pub mod simulate;

use anyhow::{Context, Result};
use lantern_core::MotionConfig;

/// Load the config at `path`, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<MotionConfig> {
    let config = match path {
        Some(path) => {
            MotionConfig::load(path).with_context(|| format!("failed to load config {}", path))?
        }
        None => MotionConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
