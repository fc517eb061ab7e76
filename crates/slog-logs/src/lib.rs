//! slog logs - Rotating line logger and chain reader
//!
//! Each line is `<secs>.<micros>:<SEVERITY>:<message>`, where the tag is the
//! time since the logger was initialized. The base file is rotated to
//! `<base>.1` once it reaches the configured line count or size, and older
//! generations move up one suffix.

mod clock;
#[cfg(test)]
pub mod mock;
mod reader;
mod rotation;
mod writer;

pub use clock::{format_elapsed, Clock, SystemClock};
pub use reader::{parse_line, GenerationInfo, LogLine, LogReader};
pub use rotation::rotated_path;
pub use writer::{Slog, Snapshot};

use once_cell::sync::OnceCell;
use slog_core::{Error, Result, Severity, SlogConfig};

static GLOBAL: OnceCell<Slog> = OnceCell::new();

/// Get the process-wide logger, created from the default config on first use
pub fn global() -> &'static Slog {
    GLOBAL.get_or_init(|| Slog::new(SlogConfig::default()))
}

/// Install the process-wide logger. Fails if one already exists.
pub fn install(config: SlogConfig) -> Result<&'static Slog> {
    GLOBAL
        .set(Slog::new(config))
        .map_err(|_| Error::config("global logger already installed"))?;
    Ok(global())
}

/// Initialize the process-wide logger
pub fn initialize() -> Result<()> {
    global().initialize()
}

/// Write one line through the process-wide logger
pub fn write(severity: Severity, message: impl AsRef<[u8]>) -> Result<()> {
    global().write(severity, message)
}

/// Format and write one line.
///
/// ```ignore
/// slog!(Severity::Err, "disk {} full\n", name)?;
/// slog!(logger: &my_logger, Severity::Info, "started\n")?;
/// ```
#[macro_export]
macro_rules! slog {
    (logger: $logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.write($severity, format!($($arg)+))
    };
    ($severity:expr, $($arg:tt)+) => {
        $crate::write($severity, format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_macro_with_explicit_logger() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("macro.log");
        let logger = Slog::new(SlogConfig::new(&path).with_max_file_name_len(4096));

        slog!(logger: &logger, Severity::Warning, "disk {} at {}%\n", "sda", 91).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let line = parse_line(content.trim_end()).unwrap();
        assert_eq!(line.severity, Severity::Warning);
        assert_eq!(line.message, "disk sda at 91%");
    }

    #[test]
    fn test_global_install_first_call_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("global.log");
        let config = SlogConfig::new(&path).with_max_file_name_len(4096);

        let logger = install(config.clone()).unwrap();
        assert_eq!(logger.path(), path.as_path());
        assert!(matches!(install(config), Err(Error::ConfigError(_))));

        initialize().unwrap();
        slog!(Severity::Crit, "code {}\n", 7).unwrap();
        write(Severity::Info, "plain\n").unwrap();

        let lines = LogReader::new(path).tail(10).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(":SLOG_TYPE_CRIT:code 7"));
        assert!(lines[1].ends_with(":SLOG_TYPE_INFO:plain"));
        assert_eq!(global().snapshot().line_count, 2);
    }
}
