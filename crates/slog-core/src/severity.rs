//! Severity levels, most to least severe

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Line prefix shared by every severity name
const NAME_PREFIX: &str = "SLOG_TYPE_";

/// Severity classification of a log line.
///
/// Variants are ordered from most to least severe, so `Severity::Emerg <
/// Severity::Debug`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// System is unusable
    Emerg,
    /// Action must be taken immediately
    Alert,
    /// Critical conditions
    Crit,
    /// Error conditions
    Err,
    /// Warning conditions
    Warning,
    /// Normal, but significant, condition
    Notice,
    /// Informational message
    Info,
    /// Debug-level message
    Debug,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::Emerg,
        Severity::Alert,
        Severity::Crit,
        Severity::Err,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Short lowercase name, as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Emerg => "emerg",
            Severity::Alert => "alert",
            Severity::Crit => "crit",
            Severity::Err => "err",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Name written into every log line (e.g. `SLOG_TYPE_ERR`)
    pub fn line_name(&self) -> &'static str {
        match self {
            Severity::Emerg => "SLOG_TYPE_EMERG",
            Severity::Alert => "SLOG_TYPE_ALERT",
            Severity::Crit => "SLOG_TYPE_CRIT",
            Severity::Err => "SLOG_TYPE_ERR",
            Severity::Warning => "SLOG_TYPE_WARNING",
            Severity::Notice => "SLOG_TYPE_NOTICE",
            Severity::Info => "SLOG_TYPE_INFO",
            Severity::Debug => "SLOG_TYPE_DEBUG",
        }
    }

    /// Look up a severity by the exact name found in a log line
    pub fn from_line_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.line_name() == name)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let short = lower
            .strip_prefix(&NAME_PREFIX.to_lowercase())
            .unwrap_or(lower.as_str());

        match short {
            "emerg" | "emergency" => Ok(Severity::Emerg),
            "alert" => Ok(Severity::Alert),
            "crit" | "critical" => Ok(Severity::Crit),
            "err" | "error" => Ok(Severity::Err),
            "warning" | "warn" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(Error::InvalidSeverity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_most_to_least_severe() {
        assert!(Severity::Emerg < Severity::Alert);
        assert!(Severity::Err < Severity::Warning);
        assert!(Severity::Info < Severity::Debug);
        assert_eq!(Severity::ALL.iter().min(), Some(&Severity::Emerg));
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Debug));
    }

    #[test]
    fn test_line_names() {
        assert_eq!(Severity::Err.line_name(), "SLOG_TYPE_ERR");
        assert_eq!(Severity::Warning.line_name(), "SLOG_TYPE_WARNING");
        for severity in Severity::ALL {
            assert!(severity.line_name().starts_with(NAME_PREFIX));
            assert_eq!(Severity::from_line_name(severity.line_name()), Some(severity));
        }
        assert_eq!(Severity::from_line_name("SLOG_TYPE_BOGUS"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("err".parse::<Severity>().unwrap(), Severity::Err);
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Err);
        assert_eq!("SLOG_TYPE_CRIT".parse::<Severity>().unwrap(), Severity::Crit);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert!(matches!(
            "fatal".parse::<Severity>(),
            Err(Error::InvalidSeverity(_))
        ));
    }
}
