use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DATA_ENV_VAR: &str = "BIKESHARE_DATA";
pub const DEFAULT_DATA_FILE: &str = "all_data.csv";
const CONFIG_DIR_NAME: &str = ".bikeshare";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of `~/.bikeshare/config.toml`. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub data_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Reads the file if it exists. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

/// Resolved deployment settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Config {
    /// Precedence: explicit value (flag), then `BIKESHARE_DATA`, then the config file,
    /// then `all_data.csv` in the working directory.
    pub fn resolve(explicit: Option<PathBuf>, env: Option<PathBuf>, file: ConfigFile) -> Self {
        let data_path = explicit
            .or(env)
            .or(file.data_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self { data_path }
    }

    /// Resolves against the real environment and home-directory config file.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        let env = std::env::var_os(DATA_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let file = match ConfigFile::default_path() {
            Some(path) => ConfigFile::load(&path)?,
            None => ConfigFile::default(),
        };
        let config = Self::resolve(explicit, env, file);
        log::debug!("Using dataset {}", config.data_path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        let file = ConfigFile { data_path: Some(PathBuf::from("from_file.csv")) };

        let c = Config::resolve(Some("flag.csv".into()), Some("env.csv".into()), file.clone());
        assert_eq!(c.data_path, PathBuf::from("flag.csv"));

        let c = Config::resolve(None, Some("env.csv".into()), file.clone());
        assert_eq!(c.data_path, PathBuf::from("env.csv"));

        let c = Config::resolve(None, None, file);
        assert_eq!(c.data_path, PathBuf::from("from_file.csv"));

        let c = Config::resolve(None, None, ConfigFile::default());
        assert_eq!(c.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_config_file_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(ConfigFile::load(&path).unwrap(), ConfigFile::default());

        fs::write(&path, "data_path = \"/srv/bike/all_data.csv\"\n").unwrap();
        assert_eq!(
            ConfigFile::load(&path).unwrap().data_path,
            Some(PathBuf::from("/srv/bike/all_data.csv"))
        );

        fs::write(&path, "").unwrap();
        assert_eq!(ConfigFile::load(&path).unwrap(), ConfigFile::default());

        fs::write(&path, "data_path = [").unwrap();
        assert!(ConfigFile::load(&path).is_err());
    }
}
