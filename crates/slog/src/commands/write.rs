//! Write command implementation

use anyhow::Result;
use slog_core::SlogConfig;
use slog_logs::Slog;
use tracing::debug;

use crate::cli::WriteArgs;

pub fn execute(mut config: SlogConfig, args: WriteArgs) -> Result<()> {
    // Every invocation is a new process; continue the chain already on disk
    config.resume_chain = true;

    let mut message = args.message.join(" ");
    if !args.no_newline {
        message.push('\n');
    }

    let slog = Slog::new(config);
    slog.write(args.severity, message)?;

    let snapshot = slog.snapshot();
    debug!(
        "Wrote to {} ({} generations)",
        slog.path().display(),
        snapshot.generation_count
    );
    Ok(())
}
