use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::service::coverage::CoveragePolicy;

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_HISTORY_DAYS: u32 = 14;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the source files live. Defaults to the config directory.
    pub data_dir: Option<PathBuf>,
    pub short_horizon: CoveragePolicy,
    pub period_tracking: CoveragePolicy,
    pub history_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            short_horizon: CoveragePolicy::SHORT_HORIZON,
            period_tracking: CoveragePolicy::PERIOD_TRACKING,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

/// `~/.opsboard`
pub fn default_base_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".opsboard"))
}

impl Config {
    /// Config and source directory for a run. An explicit data directory is
    /// read as is, and a `config.json` inside it is used when present.
    pub fn for_data_dir(data_dir: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        Self::resolve(data_dir, default_base_dir())
    }

    fn resolve(data_dir: Option<PathBuf>, home_base: Result<PathBuf>) -> Result<(Self, PathBuf)> {
        if let Some(dir) = data_dir {
            let path = dir.join(CONFIG_FILE_NAME);
            let config = if path.exists() {
                Self::read(&path)?
            } else {
                Config::default()
            };
            return Ok((config, dir));
        }

        match home_base {
            Ok(base_dir) => {
                let (config, base_dir) = Self::load(Some(base_dir))?;
                let data_dir = config.data_dir(&base_dir);
                Ok((config, data_dir))
            }
            Err(e) => {
                log::warn!("{}; using default config and the current directory", e);
                Ok((Config::default(), PathBuf::from(".")))
            }
        }
    }

    /// Reads `config.json` from `base_dir` (or `~/.opsboard`), writing the
    /// defaults there first when the file does not exist yet.
    pub fn load(base_dir: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        let base_dir = match base_dir {
            Some(dir) => dir,
            None => default_base_dir()?,
        };
        fs::create_dir_all(&base_dir)?;
        let path = base_dir.join(CONFIG_FILE_NAME);

        if !path.exists() {
            let config = Config::default();
            config.save(&path)?;
            log::info!("wrote default config to {}", path.display());
            return Ok((config, base_dir));
        }

        Ok((Self::read(&path)?, base_dir))
    }

    fn read(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn data_dir(&self, base_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => base_dir.join(dir),
            None => base_dir.to_path_buf(),
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, policy) in [("short_horizon", &self.short_horizon), ("period_tracking", &self.period_tracking)] {
            if policy.behind_below > policy.on_track_at {
                return Err(anyhow!(
                    "{}: behind_below ({}) must not exceed on_track_at ({})",
                    name,
                    policy.behind_below,
                    policy.on_track_at
                ));
            }
        }
        Ok(())
    }
}
