use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::session::{Difficulty, Mode, SessionConfig};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigMode {
    Words,
    Time,
    Endless,
}

/// Persisted defaults for the next session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mode: ConfigMode,
    pub word_count: usize,
    pub time_limit: u64,
    pub difficulty: Difficulty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ConfigMode::Words,
            word_count: 25,
            time_limit: 30,
            difficulty: Difficulty::Medium,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> SessionConfig {
        let mode = match self.mode {
            ConfigMode::Words => Mode::Words(self.word_count.max(1)),
            ConfigMode::Time => Mode::Time(self.time_limit.max(1)),
            ConfigMode::Endless => Mode::Endless,
        };
        SessionConfig::new(mode, self.difficulty)
    }

    /// Remember `session` as the new default, keeping the other mode's setting.
    pub fn remember(&mut self, session: &SessionConfig) {
        match session.mode {
            Mode::Words(n) => {
                self.mode = ConfigMode::Words;
                self.word_count = n;
            }
            Mode::Time(secs) => {
                self.mode = ConfigMode::Time;
                self.time_limit = secs;
            }
            Mode::Endless => self.mode = ConfigMode::Endless,
        }
        self.difficulty = session.difficulty;
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or malformed files fall back to defaults.
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::debug!("no config at {}: {err}", self.path.display());
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("ignoring malformed config {}: {err}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            mode: ConfigMode::Time,
            word_count: 50,
            time_limit: 60,
            difficulty: Difficulty::Programming,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"mode": "endless"}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.mode, ConfigMode::Endless);
        assert_eq!(cfg.word_count, 25);
    }

    #[test]
    fn session_config_per_mode() {
        let mut cfg = Config::default();
        assert_eq!(cfg.session_config().mode, Mode::Words(25));
        cfg.mode = ConfigMode::Time;
        assert_eq!(cfg.session_config().mode, Mode::Time(30));
        cfg.mode = ConfigMode::Endless;
        assert_eq!(cfg.session_config().mode, Mode::Endless);
    }

    #[test]
    fn zero_values_are_clamped() {
        let cfg = Config {
            word_count: 0,
            ..Config::default()
        };
        assert_eq!(cfg.session_config().mode, Mode::Words(1));
    }

    #[test]
    fn remember_keeps_other_mode_setting() {
        let mut cfg = Config::default();
        cfg.remember(&SessionConfig::new(Mode::Time(120), Difficulty::Hard));

        assert_eq!(cfg.mode, ConfigMode::Time);
        assert_eq!(cfg.time_limit, 120);
        assert_eq!(cfg.word_count, 25);
        assert_eq!(cfg.difficulty, Difficulty::Hard);
    }
}
