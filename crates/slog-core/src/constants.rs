//! Constants and default values for slog

use std::path::PathBuf;

/// Default slog home directory name (holds the config file)
pub const SLOG_DIR: &str = ".slog";

/// Default config file name
pub const CONFIG_FILE: &str = "slog.toml";

/// Default base log file path
pub const DEFAULT_LOG_FILE: &str = "/var/log/slog.log";

/// Default rotation size threshold in megabytes
pub const DEFAULT_ROTATION_SIZE_MB: u64 = 5;

/// Default rotation line-count threshold
pub const DEFAULT_ROTATION_MAX_LINES: u64 = 100_000;

/// Default maximum length of a managed file name, suffix included
pub const DEFAULT_MAX_FILE_NAME_LEN: usize = 64;

/// Bytes per megabyte used by the size threshold
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Get the slog home directory
pub fn slog_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(SLOG_DIR))
        .unwrap_or_else(|| PathBuf::from(SLOG_DIR))
}

/// Get the default config file path
pub fn config_path() -> PathBuf {
    slog_home().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slog_home() {
        let home = slog_home();
        assert!(home.to_string_lossy().contains(".slog"));
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().ends_with("slog.toml"));
    }
}
