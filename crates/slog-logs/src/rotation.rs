//! Rotated file chain: `<base>.1` (newest) through `<base>.N` (oldest)

use slog_core::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the path for a rotated log file
pub fn rotated_path(base: &Path, index: u32) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// A shift pass that stopped part way
#[derive(Debug)]
pub(crate) struct ShiftFailure {
    /// Index whose rename failed, 0 being the base file
    pub failed_at: u32,
    pub source: Error,
}

/// Operations over the numbered chain of one base file
pub(crate) struct Chain<'a> {
    base: &'a Path,
    max_name_len: usize,
}

impl<'a> Chain<'a> {
    pub fn new(base: &'a Path, max_name_len: usize) -> Self {
        Self { base, max_name_len }
    }

    /// Path of generation `index`, checked against the name length limit.
    ///
    /// The limit counts a terminating NUL, so at most `max_name_len - 1`
    /// bytes are usable.
    pub fn path(&self, index: u32) -> Result<PathBuf> {
        let path = rotated_path(self.base, index);
        if path.as_os_str().len() >= self.max_name_len {
            return Err(Error::FileNameTooLong {
                name: path.display().to_string(),
                max: self.max_name_len,
            });
        }
        Ok(path)
    }

    /// Highest generation index present on disk, gaps included.
    ///
    /// Orphans past a gap are counted so that `repair` pulls them down
    /// instead of a later shift overwriting them.
    pub fn discover(&self) -> Result<u32> {
        let dir = match self.base.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let Some(base_name) = self.base.file_name() else {
            return Ok(0);
        };
        let mut prefix = OsString::from(base_name);
        prefix.push(".");
        let prefix = prefix.to_string_lossy().into_owned();

        let mut highest = 0;
        for entry in fs::read_dir(dir).map_err(|e| Error::stat(dir, e))? {
            let entry = entry.map_err(|e| Error::stat(dir, e))?;
            let name = entry.file_name();
            let index = name
                .to_str()
                .and_then(|n| n.strip_prefix(prefix.as_str()))
                .filter(|suffix| suffix.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|suffix| suffix.parse::<u32>().ok());

            if let Some(index) = index.filter(|&i| i > 0 && self.path(i).is_ok()) {
                highest = highest.max(index);
            }
        }

        Ok(highest)
    }

    /// Close gaps in `1..=believed` left by files removed from outside.
    ///
    /// Best-effort, non-fatal: each surviving file moves down to the lowest
    /// free slot, and a file whose move fails stays where it is. Returns the
    /// highest occupied slot, which is the repaired generation count.
    pub fn repair(&self, believed: u32) -> Result<u32> {
        let mut next_free = 1;
        let mut highest = 0;

        for index in 1..=believed {
            let path = self.path(index)?;

            match fs::symlink_metadata(&path) {
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Rotated file missing: {}", path.display());
                    continue;
                }
                Err(e) => {
                    warn!("Cannot stat {}, leaving it in place: {}", path.display(), e);
                    highest = index;
                    next_free = index + 1;
                    continue;
                }
            }

            if index == next_free {
                highest = index;
                next_free += 1;
                continue;
            }

            let target = self.path(next_free)?;
            match fs::rename(&path, &target) {
                Ok(()) => {
                    debug!("Moved {} down to {}", path.display(), target.display());
                    highest = next_free;
                    next_free += 1;
                }
                Err(e) => {
                    warn!(
                        "Gap repair failed to move {} to {}: {}",
                        path.display(),
                        target.display(),
                        e
                    );
                    highest = index;
                    next_free = index + 1;
                }
            }
        }

        Ok(highest)
    }

    /// Move every generation up one slot, highest first, then archive the
    /// base file as generation 1.
    ///
    /// Returns whether the base file was archived. Slots that are already
    /// missing are skipped.
    pub fn shift(&self, count: u32) -> std::result::Result<bool, ShiftFailure> {
        for index in (0..=count).rev() {
            let (from, to) = self.step(index).map_err(|source| ShiftFailure {
                failed_at: index,
                source,
            })?;

            match fs::rename(&from, &to) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Skipping missing {}", from.display());
                    if index == 0 {
                        return Ok(false);
                    }
                }
                Err(e) => {
                    return Err(ShiftFailure {
                        failed_at: index,
                        source: Error::rename(from, to, e),
                    });
                }
            }
        }

        Ok(true)
    }

    /// Source and destination of the rename that moves `index` up one slot
    fn step(&self, index: u32) -> Result<(PathBuf, PathBuf)> {
        let from = if index == 0 {
            self.base.to_path_buf()
        } else {
            self.path(index)?
        };
        Ok((from, self.path(index + 1)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(generations: &[u32]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("app.log");
        fs::write(&base, "active").unwrap();
        for &i in generations {
            fs::write(rotated_path(&base, i), format!("gen{}", i)).unwrap();
        }
        (dir, base)
    }

    fn read(base: &Path, index: u32) -> Option<String> {
        fs::read_to_string(rotated_path(base, index)).ok()
    }

    #[test]
    fn test_rotated_path() {
        let base = PathBuf::from("/var/log/app.log");
        assert_eq!(rotated_path(&base, 1), PathBuf::from("/var/log/app.log.1"));
        assert_eq!(rotated_path(&base, 12), PathBuf::from("/var/log/app.log.12"));
    }

    #[test]
    fn test_path_length_limit() {
        let base = PathBuf::from("/var/log/app.log");
        let chain = Chain::new(&base, 19);
        assert!(chain.path(9).is_ok());
        assert!(matches!(
            chain.path(10),
            Err(Error::FileNameTooLong { max: 19, .. })
        ));
    }

    #[test]
    fn test_path_length_limit_reserves_terminator() {
        // 62-byte base + ".1" is 64 bytes, one more than a 64-byte buffer holds
        let base = PathBuf::from(format!("/{}", "a".repeat(61)));
        assert_eq!(base.as_os_str().len(), 62);
        assert!(matches!(
            Chain::new(&base, 64).path(1),
            Err(Error::FileNameTooLong { max: 64, .. })
        ));

        let base = PathBuf::from(format!("/{}", "a".repeat(60)));
        assert!(Chain::new(&base, 64).path(1).is_ok());
    }

    #[test]
    fn test_discover_counts_past_gaps() {
        let (dir, base) = setup(&[1, 2, 4]);
        fs::write(dir.path().join("app.log.old"), "x").unwrap();
        fs::write(dir.path().join("other.log.9"), "x").unwrap();
        assert_eq!(Chain::new(&base, 4096).discover().unwrap(), 4);
    }

    #[test]
    fn test_discover_empty_chain() {
        let (_dir, base) = setup(&[]);
        assert_eq!(Chain::new(&base, 4096).discover().unwrap(), 0);
    }

    #[test]
    fn test_repair_contiguous_chain_untouched() {
        let (_dir, base) = setup(&[1, 2, 3]);
        let repaired = Chain::new(&base, 4096).repair(3).unwrap();
        assert_eq!(repaired, 3);
        assert_eq!(read(&base, 2).as_deref(), Some("gen2"));
    }

    #[test]
    fn test_repair_single_gap() {
        let (_dir, base) = setup(&[1, 3, 4]);
        let repaired = Chain::new(&base, 4096).repair(4).unwrap();

        assert_eq!(repaired, 3);
        assert_eq!(read(&base, 1).as_deref(), Some("gen1"));
        assert_eq!(read(&base, 2).as_deref(), Some("gen3"));
        assert_eq!(read(&base, 3).as_deref(), Some("gen4"));
        assert_eq!(read(&base, 4), None);
    }

    #[test]
    fn test_repair_multiple_gaps() {
        let (_dir, base) = setup(&[2, 5]);
        let repaired = Chain::new(&base, 4096).repair(5).unwrap();

        assert_eq!(repaired, 2);
        assert_eq!(read(&base, 1).as_deref(), Some("gen2"));
        assert_eq!(read(&base, 2).as_deref(), Some("gen5"));
        assert_eq!(read(&base, 3), None);
        assert_eq!(read(&base, 5), None);
    }

    #[test]
    fn test_repair_everything_missing() {
        let (_dir, base) = setup(&[]);
        assert_eq!(Chain::new(&base, 4096).repair(3).unwrap(), 0);
    }

    #[test]
    fn test_shift_archives_base() {
        let (_dir, base) = setup(&[1, 2]);
        let archived = Chain::new(&base, 4096).shift(2).unwrap();

        assert!(archived);
        assert!(!base.exists());
        assert_eq!(read(&base, 1).as_deref(), Some("active"));
        assert_eq!(read(&base, 2).as_deref(), Some("gen1"));
        assert_eq!(read(&base, 3).as_deref(), Some("gen2"));
    }

    #[test]
    fn test_shift_reports_failed_index() {
        let (_dir, base) = setup(&[1]);
        // Renaming a file onto a non-empty directory fails
        let blocker = rotated_path(&base, 2);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let failure = Chain::new(&base, 4096).shift(1).unwrap_err();
        assert_eq!(failure.failed_at, 1);
        assert!(matches!(failure.source, Error::Rename { .. }));
        assert!(base.exists());
        assert_eq!(read(&base, 1).as_deref(), Some("gen1"));
    }
}
