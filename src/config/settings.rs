use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::GoalConfig;
use crate::models::Metric;

fn default_water() -> TrackerConfig {
    TrackerConfig {
        daily_target: 2000.0,
        evaluation_window: Some(7),
    }
}
fn default_weight() -> TrackerConfig {
    TrackerConfig {
        daily_target: 70.0,
        evaluation_window: None,
    }
}
fn default_meditation() -> TrackerConfig {
    TrackerConfig {
        daily_target: 10.0,
        evaluation_window: Some(7),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub daily_target: f64,
    /// Trailing window (days) for perfect-run milestones; omit to disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_window: Option<u32>,
}

impl TrackerConfig {
    pub fn goal(&self) -> GoalConfig {
        match self.evaluation_window {
            Some(window) => GoalConfig::with_window(self.daily_target, window),
            None => GoalConfig::new(self.daily_target),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_water")]
    pub water: TrackerConfig,
    #[serde(default = "default_weight")]
    pub weight: TrackerConfig,
    #[serde(default = "default_meditation")]
    pub meditation: TrackerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            water: default_water(),
            weight: default_weight(),
            meditation: default_meditation(),
        }
    }
}

impl AppConfig {
    pub fn tracker(&self, metric: Metric) -> &TrackerConfig {
        match metric {
            Metric::Water => &self.water,
            Metric::Weight => &self.weight,
            Metric::Meditation => &self.meditation,
        }
    }

    pub fn tracker_mut(&mut self, metric: Metric) -> &mut TrackerConfig {
        match metric {
            Metric::Water => &mut self.water,
            Metric::Weight => &mut self.weight,
            Metric::Meditation => &mut self.meditation,
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "nourish").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("nourish.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            log::debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
