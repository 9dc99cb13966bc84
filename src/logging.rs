//! Tracing setup: human-readable stdout plus a daily-rotated log file.

use notshop_core::config::NotshopConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rotated log files kept on disk; older ones are deleted.
const MAX_LOG_FILES: usize = 7;

/// HTTP transport crates that log every request at debug level.
const QUIET_TARGETS: [&str; 4] = ["reqwest", "hyper", "hyper_util", "rustls"];

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured `log_level`. The returned guard
/// flushes the file writer on drop, so keep it alive for the whole run.
pub fn init(cfg: &NotshopConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&cfg.log_dir)
        .map_err(|e| anyhow::anyhow!("cannot create log dir {}: {e}", cfg.log_dir))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&cfg.log_file)
        .max_log_files(MAX_LOG_FILES)
        .build(&cfg.log_dir)
        .map_err(|e| anyhow::anyhow!("cannot open log file in {}: {e}", cfg.log_dir))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&cfg.log_level)))
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

/// Filter used when `RUST_LOG` is unset: `level` for our code, warnings only
/// for the HTTP stack.
fn default_directives(level: &str) -> String {
    let mut directives = level.to_string();
    for target in QUIET_TARGETS {
        directives.push_str(&format!(",{target}=warn"));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_quiet_http_stack() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("reqwest=warn"));
        assert!(directives.contains("hyper=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_default_directives_accept_configured_level() {
        for level in ["info", "warn", "notshop=trace"] {
            assert!(EnvFilter::try_new(default_directives(level)).is_ok());
        }
    }
}
