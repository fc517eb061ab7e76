//! Error types for slog

use std::path::PathBuf;

/// slog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clock error: {0}")]
    Clock(String),

    #[error("Failed to stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log file not open: {0} (reopen required)")]
    NotOpen(PathBuf),

    #[error("File name too long ({max} max): {name}")]
    FileNameTooLong { name: String, max: usize },

    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// Result type alias for slog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn clock<S: Into<String>>(msg: S) -> Self {
        Error::Clock(msg.into())
    }

    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }

    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Stat {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }

    pub fn rename(from: impl Into<PathBuf>, to: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Rename {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotOpen(PathBuf::from("/tmp/app.log"));
        assert_eq!(err.to_string(), "Log file not open: /tmp/app.log (reopen required)");
    }

    #[test]
    fn test_rename_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::rename("/tmp/a.log.1", "/tmp/a.log.2", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to rename /tmp/a.log.1 to /tmp/a.log.2: denied"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }
}
