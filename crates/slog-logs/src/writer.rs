//! Log controller: append path and rotation sequencing

use parking_lot::Mutex;
use slog_core::{Error, Result, Severity, SlogConfig, BYTES_PER_MB};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clock::{format_elapsed, Clock, SystemClock};
use crate::rotation::Chain;

/// Mutable controller state, guarded as a whole by one lock
#[derive(Debug, Default)]
struct State {
    initialized: bool,
    /// Append handle to the base file; `None` after a failed reopen
    handle: Option<File>,
    /// Lines written to the active file since it was opened
    lines: u64,
    /// Rotated files believed to exist, excluding the active file
    generations: u32,
    startup: Duration,
    /// Last elapsed tag written, so tags never go backwards
    last_elapsed: Duration,
}

/// Point-in-time view of the controller counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub initialized: bool,
    pub handle_open: bool,
    pub line_count: u64,
    pub generation_count: u32,
}

/// Rotating line logger.
///
/// Every `write` runs its stat, optional rotation and append inside one
/// critical section, so a `Slog` can be shared freely between threads.
pub struct Slog {
    config: SlogConfig,
    clock: Arc<dyn Clock>,
    /// Opens the base file for appending
    open: fn(&Path) -> Result<File>,
    state: Mutex<State>,
}

impl std::fmt::Debug for Slog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slog")
            .field("config", &self.config)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl Slog {
    /// Create an uninitialized logger using the system clock
    pub fn new(config: SlogConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create an uninitialized logger with a custom time source
    pub fn with_clock(config: SlogConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            open: open_active,
            state: Mutex::new(State::default()),
        }
    }

    #[cfg(test)]
    fn with_open_fn(mut self, open: fn(&Path) -> Result<File>) -> Self {
        self.open = open;
        self
    }

    /// Get the base log file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &SlogConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock();
        Snapshot {
            initialized: state.initialized,
            handle_open: state.handle.is_some(),
            line_count: state.lines,
            generation_count: state.generations,
        }
    }

    /// Open the base file and capture the startup time.
    ///
    /// Does nothing if already initialized. On failure nothing is kept, so
    /// the next call starts over.
    pub fn initialize(&self) -> Result<()> {
        let mut state = self.state.lock();
        self.initialize_locked(&mut state)
    }

    /// Append one line: `<secs>.<micros>:<SEVERITY>:<message>`.
    ///
    /// No line terminator is added; `message` carries its own. The file is
    /// rotated first when the line or size threshold has been reached.
    pub fn write(&self, severity: Severity, message: impl AsRef<[u8]>) -> Result<()> {
        let mut state = self.state.lock();
        self.initialize_locked(&mut state)?;

        if state.handle.is_none() {
            return Err(Error::NotOpen(self.config.path.clone()));
        }

        // A failed clock read must not leave a line or a rotation behind
        let elapsed = self.elapsed(&state)?;

        let path = &self.config.path;
        match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Log file {} missing, recreating", path.display());
                state.handle = Some((self.open)(path)?);
                state.lines = 0;
            }
            Err(e) => return Err(Error::stat(path, e)),
            Ok(meta) => {
                if self.rotation_due(&state, meta.len()) {
                    self.rotate(&mut state)?;
                }
            }
        }

        let mut line = format!("{}:{}:", format_elapsed(elapsed), severity.line_name()).into_bytes();
        line.extend_from_slice(message.as_ref());

        let handle = state
            .handle
            .as_mut()
            .ok_or_else(|| Error::NotOpen(path.clone()))?;
        handle
            .write_all(&line)
            .and_then(|_| handle.flush())
            .map_err(|e| Error::write(path, e))?;

        state.lines += 1;
        state.last_elapsed = elapsed;
        Ok(())
    }

    /// Reopen the base file after a failed rotation left no active handle
    pub fn reopen(&self) -> Result<()> {
        let mut state = self.state.lock();
        if !state.initialized {
            return self.initialize_locked(&mut state);
        }

        let handle = (self.open)(&self.config.path)?;
        info!("Reopened log file {}", self.config.path.display());
        state.handle = Some(handle);
        Ok(())
    }

    fn initialize_locked(&self, state: &mut State) -> Result<()> {
        if state.initialized {
            return Ok(());
        }

        self.config.validate()?;
        let path = &self.config.path;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::open(parent, e))?;
        }

        let handle = (self.open)(path)?;
        let startup = self.clock.now()?;

        let generations = if self.config.resume_chain {
            Chain::new(path, self.config.max_file_name_len).discover()?
        } else {
            0
        };

        *state = State {
            initialized: true,
            handle: Some(handle),
            lines: 0,
            generations,
            startup,
            last_elapsed: Duration::ZERO,
        };

        info!(
            "Logging to {} (rotate at {} lines or {} MB, {} existing generations)",
            path.display(),
            self.config.rotation_max_lines,
            self.config.rotation_size_mb,
            generations
        );
        Ok(())
    }

    fn rotation_due(&self, state: &State, size: u64) -> bool {
        state.lines >= self.config.rotation_max_lines
            || size / BYTES_PER_MB >= self.config.rotation_size_mb
    }

    fn elapsed(&self, state: &State) -> Result<Duration> {
        let now = self.clock.now()?;

        let elapsed = now.checked_sub(state.startup).unwrap_or_else(|| {
            warn!("Clock is behind the startup time, clamping elapsed time");
            Duration::ZERO
        });

        if elapsed < state.last_elapsed {
            warn!("Clock stepped backwards, reusing the previous elapsed time");
            return Ok(state.last_elapsed);
        }

        Ok(elapsed)
    }

    /// Archive the active file as `<base>.1` and start a fresh one
    fn rotate(&self, state: &mut State) -> Result<()> {
        let path = &self.config.path;
        let chain = Chain::new(path, self.config.max_file_name_len);
        debug!("Rotating log file: {}", path.display());

        // Check the longest name this pass can produce before touching anything
        chain.path(state.generations + 1)?;

        // Close current file
        state.handle = None;

        let repaired = chain.repair(state.generations)?;
        if repaired != state.generations {
            warn!(
                "Rotated chain of {} had gaps, {} of {} generations remain",
                path.display(),
                repaired,
                state.generations
            );
        }
        state.generations = repaired;

        let archived = match chain.shift(repaired) {
            Ok(archived) => archived,
            Err(failure) => {
                // Files above the failed index already moved up one slot
                if failure.failed_at < repaired {
                    state.generations = repaired + 1;
                }

                // Keep logging to the unrotated base file
                match (self.open)(path) {
                    Ok(handle) => state.handle = Some(handle),
                    Err(e) => warn!("Failed to reopen {} after rotation error: {}", path.display(), e),
                }
                return Err(failure.source);
            }
        };

        if archived {
            state.generations += 1;
        }
        state.lines = 0;

        // Create new file; on failure writes stay refused until reopen()
        state.handle = Some((self.open)(path)?);
        Ok(())
    }
}

/// Open or create the base file in append mode
fn open_active(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::open(path, e))
}
