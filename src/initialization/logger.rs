//! Logger initialization.
//!
//! Log lines go to the log file; with the terminal toggle enabled they are
//! mirrored to stderr as well, matching the `-o` CLI flag.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use log::LevelFilter;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Writer that appends to the log file and optionally mirrors to stderr.
struct LogSink {
    file: File,
    mirror_terminal: bool,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.mirror_terminal {
            let _ = io::stderr().write_all(buf);
        }
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.mirror_terminal {
            let _ = io::stderr().flush();
        }
        self.file.flush()
    }
}

/// Initializes the logger with the specified level, format, and sink.
///
/// Configures `env_logger` with custom formatting. The logger reads from the
/// `RUST_LOG` environment variable by default, but the provided `level`
/// parameter will override it.
///
/// # Errors
///
/// Returns `InitializationError::LoggerSetupError` if the log file cannot be
/// opened, or `InitializationError::LoggerError` if logger setup fails.
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    log_file: &Path,
    mirror_terminal: bool,
) -> Result<(), InitializationError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            InitializationError::LoggerSetupError(format!(
                "failed to open log file {}: {e}",
                log_file.display()
            ))
        })?;

    // Color codes only make sense when somebody is watching the terminal.
    colored::control::set_override(mirror_terminal);

    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("sqlx", LevelFilter::Info);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("coordinate_transform", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "[{}] [{}] [{}]",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder.target(env_logger::Target::Pipe(Box::new(LogSink {
        file,
        mirror_terminal,
    })));

    // try_init() instead of init() so tests can call this more than once
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
