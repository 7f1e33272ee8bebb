use anyhow::{Context, Result};
use gesture_core::RecorderSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::hand::HandConfig;

/// Contents of an authoring config file. Every table and key is optional.
#[derive(Default, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub recorder: RecorderSettings,
    pub hand: HandConfig,
}

pub fn parse(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).context("failed to parse config")?;
    config.recorder.validate()?;
    Ok(config)
}

/// Effective config as TOML, loadable again with `load`.
pub fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("failed to render config")
}

pub fn load(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to open config {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("in {}", path.display()))?;
    log::info!("[config] loaded {}", path.display());
    Ok(config)
}
