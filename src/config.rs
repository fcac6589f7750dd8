//! Command-line settings and logging bootstrap

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_API_URL, LOG_FILE_NAME};
use crate::models::Theme;

/// Track expenses against a REST expense API from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "expense-tui", version)]
pub struct Settings {
    /// Base URL of the expense resource
    #[arg(long, env = "EXPENSE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Initial color theme
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "expense_tui=debug")
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory for the log file (defaults to the platform cache directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Where the log file goes
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|dir| dir.join("expense-tui"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

/// Install a file-backed `tracing` subscriber.
///
/// The terminal is in raw mode while the UI runs, so nothing is written to
/// stdout or stderr. The returned guard flushes the writer on drop and must
/// be held for the life of the program.
pub fn setup_logging(settings: &Settings) -> anyhow::Result<WorkerGuard> {
    let log_dir = settings.resolved_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(["expense-tui"]);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_api_url_defaults_and_reads_env() {
        let command = Settings::command();
        let api_url = command
            .get_arguments()
            .find(|arg| arg.get_id() == "api_url")
            .expect("api_url argument");

        let defaults: Vec<_> = api_url.get_default_values().iter().map(|v| v.to_str()).collect();
        assert_eq!(defaults, [Some(DEFAULT_API_URL)]);
        assert_eq!(api_url.get_env(), Some(OsStr::new("EXPENSE_API_URL")));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::parse_from([
            "expense-tui",
            "--api-url",
            "http://example.test/api/expenses",
            "--theme",
            "light",
            "--log-dir",
            "/tmp/expense-logs",
        ]);
        assert_eq!(settings.api_url, "http://example.test/api/expenses");
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.resolved_log_dir(), PathBuf::from("/tmp/expense-logs"));
    }
}
