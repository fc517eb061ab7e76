//! Reader for the active log file and its rotated generations

use slog_core::{Result, Severity};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::rotation::rotated_path;

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Time since the writing process initialized its logger
    pub elapsed: Duration,
    pub severity: Severity,
    pub message: String,
}

/// Parse `<secs>.<micros>:<SEVERITY>:<message>`
pub fn parse_line(line: &str) -> Option<LogLine> {
    let mut parts = line.splitn(3, ':');
    let tag = parts.next()?;
    let severity = Severity::from_line_name(parts.next()?)?;
    let message = parts.next()?.to_string();

    let (secs, micros) = tag.split_once('.')?;
    let secs: u64 = secs.parse().ok()?;
    let micros: u32 = micros.parse().ok()?;
    if micros >= 1_000_000 {
        return None;
    }

    Some(LogLine {
        elapsed: Duration::new(secs, micros * 1_000),
        severity,
        message,
    })
}

/// A file in the chain, generation 0 being the active file
#[derive(Debug, Clone)]
pub struct GenerationInfo {
    pub index: u32,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Log reader over a base file and its `<base>.N` chain
pub struct LogReader {
    base: PathBuf,
}

impl LogReader {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Path of a generation (0 is the active file)
    pub fn generation_path(&self, index: u32) -> PathBuf {
        if index == 0 {
            self.base.clone()
        } else {
            rotated_path(&self.base, index)
        }
    }

    /// Read the last N lines of the active file
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        self.tail_generation(0, n)
    }

    /// Read the last N lines of one generation
    pub fn tail_generation(&self, index: u32, n: usize) -> Result<Vec<String>> {
        let path = self.generation_path(index);
        if !path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(File::open(&path)?);

        // Read all lines and keep last N
        let mut lines: VecDeque<String> = VecDeque::with_capacity(n + 1);
        for line_result in reader.lines() {
            lines.push_back(line_result?);
            if lines.len() > n {
                lines.pop_front();
            }
        }

        Ok(lines.into_iter().collect())
    }

    /// Count the lines in one generation
    pub fn line_count(&self, index: u32) -> Result<usize> {
        let path = self.generation_path(index);
        if !path.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for line in BufReader::new(File::open(&path)?).split(b'\n') {
            line?;
            count += 1;
        }
        Ok(count)
    }

    /// List the active file and the contiguous chain that follows it
    pub fn generations(&self) -> Result<Vec<GenerationInfo>> {
        let mut infos = Vec::new();

        if let Some(info) = self.info(0)? {
            infos.push(info);
        }

        let mut index = 1;
        while let Some(info) = self.info(index)? {
            infos.push(info);
            index += 1;
        }

        Ok(infos)
    }

    /// Check if the active log file exists
    pub fn exists(&self) -> bool {
        self.base.exists()
    }

    pub fn path(&self) -> &Path {
        &self.base
    }

    fn info(&self, index: u32) -> Result<Option<GenerationInfo>> {
        let path = self.generation_path(index);
        if !path.exists() {
            return Ok(None);
        }

        let meta = std::fs::metadata(&path)?;
        Ok(Some(GenerationInfo {
            index,
            size: meta.len(),
            modified: meta.modified().ok(),
            path,
        }))
    }
}
