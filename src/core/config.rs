/*
 * Application configuration: log verbosity, an optional log file, and the
 * options the filesystem scanner needs (exclude patterns and the extensions
 * that mark a partial download). Settings are stored as `config.json` in the
 * platform's local configuration directory for the application.
 *
 * Access goes through `ConfigManagerOperations` so the binary can be tested with
 * a mock or pointed at a temporary directory. A missing file is not an error;
 * it yields `AppConfig::default()`.
 */
use super::file_system::ScanOptions;
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoProjectDirectory,
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration file format error: {e}"),
            ConfigError::NoProjectDirectory => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub respect_ignore_files: bool,
    pub exclude_patterns: Vec<String>,
    pub partial_extensions: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: "info".to_string(),
            log_file: None,
            respect_ignore_files: true,
            exclude_patterns: Vec::new(),
            partial_extensions: ["part", "partial", "crdownload", "download"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Unparseable levels fall back to `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or_else(|_| {
            log::warn!(
                "AppConfig: Unknown log level '{}', using 'info'.",
                self.log_level
            );
            LevelFilter::Info
        })
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            exclude_patterns: self.exclude_patterns.clone(),
            partial_extensions: self.partial_extensions.clone(),
            respect_ignore_files: self.respect_ignore_files,
        }
    }
}

pub trait ConfigManagerOperations {
    fn load_config(&self, app_name: &str) -> Result<AppConfig>;
    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()>;
}

pub struct CoreConfigManager {
    config_dir_override: Option<PathBuf>,
}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {
            config_dir_override: None,
        }
    }

    /// Uses `config_dir` instead of the platform directory.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        CoreConfigManager {
            config_dir_override: Some(config_dir),
        }
    }

    fn config_file_path(&self, app_name: &str) -> Result<PathBuf> {
        let config_dir = match &self.config_dir_override {
            Some(dir) => dir.clone(),
            None => ProjectDirs::from("", "", app_name)
                .map(|dirs| dirs.config_local_dir().to_path_buf())
                .ok_or(ConfigError::NoProjectDirectory)?,
        };
        Ok(config_dir.join(CONFIG_FILENAME))
    }

    fn ensure_parent_dir(file_path: &Path) -> Result<()> {
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
                log::debug!("CoreConfigManager: Created config directory {parent:?}.");
            }
        }
        Ok(())
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn load_config(&self, app_name: &str) -> Result<AppConfig> {
        let file_path = self.config_file_path(app_name)?;
        if !file_path.exists() {
            log::debug!("CoreConfigManager: {file_path:?} does not exist, using defaults.");
            return Ok(AppConfig::default());
        }
        let reader = BufReader::new(File::open(&file_path)?);
        let config: AppConfig = serde_json::from_reader(reader)?;
        log::debug!("CoreConfigManager: Loaded config from {file_path:?}.");
        Ok(config)
    }

    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()> {
        let file_path = self.config_file_path(app_name)?;
        Self::ensure_parent_dir(&file_path)?;
        let mut writer = BufWriter::new(File::create(&file_path)?);
        serde_json::to_writer_pretty(&mut writer, config)?;
        writer.flush()?;
        log::debug!("CoreConfigManager: Saved config to {file_path:?}.");
        Ok(())
    }
}
