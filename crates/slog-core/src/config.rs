//! Configuration file parsing for slog
//!
//! The config file is TOML. Every field is optional and falls back to the
//! defaults in [`crate::constants`]:
//!
//! ```toml
//! path = "/var/log/slog.log"
//! rotation_size_mb = 5
//! rotation_max_lines = 100000
//! max_file_name_len = 64
//! resume_chain = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::*;
use crate::error::{Error, Result};

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_rotation_size_mb() -> u64 {
    DEFAULT_ROTATION_SIZE_MB
}

fn default_rotation_max_lines() -> u64 {
    DEFAULT_ROTATION_MAX_LINES
}

fn default_max_file_name_len() -> usize {
    DEFAULT_MAX_FILE_NAME_LEN
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlogConfig {
    /// Base (non-suffixed) log file path
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Size in megabytes at which the active file is rotated
    #[serde(default = "default_rotation_size_mb")]
    pub rotation_size_mb: u64,
    /// Line count at which the active file is rotated
    #[serde(default = "default_rotation_max_lines")]
    pub rotation_max_lines: u64,
    /// Size of the name buffer for managed files, numeric suffix and
    /// terminating NUL included (usable length is one less)
    #[serde(default = "default_max_file_name_len")]
    pub max_file_name_len: usize,
    /// Adopt an existing `<path>.1..N` chain on initialization instead of
    /// starting the generation count at zero
    #[serde(default)]
    pub resume_chain: bool,
}

impl Default for SlogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            rotation_size_mb: DEFAULT_ROTATION_SIZE_MB,
            rotation_max_lines: DEFAULT_ROTATION_MAX_LINES,
            max_file_name_len: DEFAULT_MAX_FILE_NAME_LEN,
            resume_chain: false,
        }
    }
}

impl SlogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_rotation_size_mb(mut self, size_mb: u64) -> Self {
        self.rotation_size_mb = size_mb;
        self
    }

    pub fn with_rotation_max_lines(mut self, max_lines: u64) -> Self {
        self.rotation_max_lines = max_lines;
        self
    }

    pub fn with_max_file_name_len(mut self, len: usize) -> Self {
        self.max_file_name_len = len;
        self
    }

    pub fn with_resume_chain(mut self, resume: bool) -> Self {
        self.resume_chain = resume;
        self
    }

    /// Load config from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a specific path, using defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load config from a path that must exist
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        Self::load_from(path)
    }

    /// Parse TOML config content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SlogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check thresholds and name limits
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::config("Log file path is empty"));
        }

        if self.rotation_size_mb == 0 {
            return Err(Error::config("rotation_size_mb must be greater than 0"));
        }

        if self.rotation_max_lines == 0 {
            return Err(Error::config("rotation_max_lines must be greater than 0"));
        }

        // Room for the ".1" suffix and a terminating NUL
        let base_len = self.path.as_os_str().len();
        if base_len + 2 >= self.max_file_name_len {
            return Err(Error::FileNameTooLong {
                name: self.path.display().to_string(),
                max: self.max_file_name_len,
            });
        }

        Ok(())
    }
}
