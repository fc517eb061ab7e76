//! Tail command implementation

use anyhow::Result;
use slog_core::SlogConfig;
use slog_logs::LogReader;

use crate::cli::TailArgs;
use crate::output::{print_error, print_log_line};

pub fn execute(config: &SlogConfig, args: TailArgs) -> Result<()> {
    let reader = LogReader::new(config.path.clone());
    let path = reader.generation_path(args.generation);

    if !path.exists() {
        print_error(&format!("No log file at {}", path.display()));
        return Ok(());
    }

    for line in reader.tail_generation(args.generation, args.lines)? {
        if args.raw {
            println!("{}", line);
        } else {
            print_log_line(&line);
        }
    }

    Ok(())
}
