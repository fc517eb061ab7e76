//! Status command implementation

use anyhow::Result;
use slog_core::SlogConfig;
use slog_logs::LogReader;

use crate::output::{print_generations, print_info};

pub fn execute(config: &SlogConfig) -> Result<()> {
    let reader = LogReader::new(config.path.clone());

    print_info(&format!(
        "{} (rotate at {} lines or {} MB)",
        config.path.display(),
        config.rotation_max_lines,
        config.rotation_size_mb
    ));

    let generations = reader.generations()?;
    let mut rows = Vec::with_capacity(generations.len());
    for info in generations {
        let lines = reader.line_count(info.index)?;
        rows.push((info, lines));
    }

    print_generations(&rows);
    Ok(())
}
