//! Terminal output formatting

use chrono::{DateTime, Local};
use colored::Colorize;
use slog_core::Severity;
use slog_logs::{format_elapsed, parse_line, GenerationInfo};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
pub struct GenerationRow {
    #[tabled(rename = "gen")]
    pub index: u32,
    #[tabled(rename = "file")]
    pub file: String,
    #[tabled(rename = "size")]
    pub size: String,
    #[tabled(rename = "lines")]
    pub lines: usize,
    #[tabled(rename = "modified")]
    pub modified: String,
}

pub fn print_generations(rows: &[(GenerationInfo, usize)]) {
    if rows.is_empty() {
        println!("No log files found");
        return;
    }

    let rows: Vec<GenerationRow> = rows
        .iter()
        .map(|(info, lines)| GenerationRow {
            index: info.index,
            file: info.path.display().to_string(),
            size: format_bytes(info.size),
            lines: *lines,
            modified: info
                .modified
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Print a stored line with its severity highlighted
pub fn print_log_line(line: &str) {
    match parse_line(line) {
        Some(parsed) => println!(
            "{} {} {}",
            format_elapsed(parsed.elapsed).dimmed(),
            format_severity(parsed.severity),
            parsed.message
        ),
        None => println!("{}", line),
    }
}

fn format_severity(severity: Severity) -> String {
    let name = severity.line_name();
    match severity {
        Severity::Emerg | Severity::Alert => name.red().bold().to_string(),
        Severity::Crit | Severity::Err => name.red().to_string(),
        Severity::Warning => name.yellow().to_string(),
        Severity::Notice => name.cyan().to_string(),
        Severity::Info => name.green().to_string(),
        Severity::Debug => name.blue().to_string(),
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1}G", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.0}K", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
