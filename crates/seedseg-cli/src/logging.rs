//! Logger setup

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use std::path::Path;

/// Size at which a log file is rotated.
const ROTATE_BYTES: u64 = 1024 * 1024;

/// Rotated log files kept on disk.
const KEEP_LOG_FILES: usize = 5;

/// Start logging with the given level specification.
///
/// Without `log_dir` everything goes to stderr. With it, records are
/// written to rotated files in that directory and warnings are also
/// duplicated to stderr. The returned handle must stay alive for as long
/// as logging is needed.
pub fn setup_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle> {
    let logger = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level specification {level:?}"))?;

    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .duplicate_to_stderr(Duplicate::Warn)
            .rotate(
                Criterion::Size(ROTATE_BYTES),
                Naming::Timestamps,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            ),
        None => logger.log_to_stderr(),
    };

    logger.start().context("logger initialization failed")
}
