//! Scenario description for the thin command-line entry point.
//!
//! The core takes its parameters as constructed values; this module only
//! exists so one YAML file can describe a whole replay scenario.

use crate::role::RoleConfig;
use crate::scene::{Bounds, ComposerOptions};
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_prefix() -> String {
    "dev_pos".to_string()
}

fn default_interval_ms() -> u64 {
    200
}

fn default_field_size() -> f64 {
    60.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayConfig {
    /// Directory holding the simulator's per-device CSV traces.
    pub data_dir: PathBuf,
    pub num_devices: usize,
    #[serde(default = "default_prefix")]
    pub file_prefix: String,
    pub roles: RoleConfig,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub numbered_titles: bool,
    /// Side length of the simulated field; ignored if `viewport` is set.
    #[serde(default = "default_field_size")]
    pub field_size: f64,
    #[serde(default)]
    pub viewport: Option<Bounds>,
    /// Path of the exported scene stream.
    pub output: PathBuf,
}

impl ReplayConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading scenario config {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing scenario config {}", path.display()))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn composer_options(&self) -> ComposerOptions {
        ComposerOptions {
            title: self.title.clone(),
            bounds: self
                .viewport
                .unwrap_or_else(|| Bounds::square(self.field_size)),
            numbered_titles: self.numbered_titles,
        }
    }
}
