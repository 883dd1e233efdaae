//! Tracing setup
//!
//! Commands that print to the terminal log to stderr. The interactive screen
//! owns the terminal, so it logs to the configured file instead.

use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::AppError;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Initialize tracing/logging
///
/// Can only be called once per process. The returned guard must be held
/// until exit when logging to a file, or buffered lines are lost.
pub fn init_tracing(
    cfg: &LoggingConfig,
    target: LogTarget,
) -> Result<Option<WorkerGuard>, AppError> {
    let directive = resolve_directive(std::env::var("RUST_LOG").ok(), &cfg.level);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| AppError::LoggingError(format!("invalid filter '{}': {}", directive, e)))?;

    let (writer, guard, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), None, true),
        LogTarget::File => {
            let (non_blocking, guard) = file_writer(&cfg.file)?;
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
    };

    let (json_layer, plain_layer) = match cfg.format {
        LogFormat::Json => (Some(fmt::layer().json().with_writer(writer)), None),
        LogFormat::Pretty => (
            None,
            Some(fmt::layer().with_target(true).with_ansi(ansi).with_writer(writer)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(plain_layer)
        .try_init()
        .map_err(|e| AppError::LoggingError(e.to_string()))?;

    Ok(guard)
}

/// `RUST_LOG` wins over the configured level
fn resolve_directive(from_env: Option<String>, level: &str) -> String {
    match from_env {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => level.to_ascii_lowercase(),
    }
}

fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), AppError> {
    let file_name = path.file_name().ok_or_else(|| {
        AppError::LoggingError(format!("log path has no file name: {}", path.display()))
    })?;
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .map_err(|e| {
            AppError::LoggingError(format!("cannot open log file {}: {}", path.display(), e))
        })?;
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_directive_prefers_env() {
        assert_eq!(
            resolve_directive(Some("unit_price_compare=trace".to_string()), "info"),
            "unit_price_compare=trace"
        );
    }

    #[test]
    fn test_resolve_directive_falls_back_to_level() {
        assert_eq!(resolve_directive(None, "WARN"), "warn");
        assert_eq!(resolve_directive(Some("  ".to_string()), "debug"), "debug");
    }

    #[test]
    fn test_file_writer_rejects_path_without_name() {
        let result = file_writer(Path::new("/"));
        assert!(matches!(result, Err(AppError::LoggingError(_))));
    }

    #[test]
    fn test_file_writer_reports_directory_as_error() {
        let dir = std::env::temp_dir().join("unit_price_compare_log_is_a_dir");
        std::fs::create_dir_all(&dir).unwrap();

        let result = file_writer(&dir);
        assert!(matches!(result, Err(AppError::LoggingError(_))));
    }
}
