//! Logging and tracing initialization.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs always go to stdout; if `config.file` is set, the same events are
/// appended there as well (without ANSI escapes). The fmt layers are boxed
/// so the JSON and plain branches share one subscriber shape.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let fmt_layer: Box<dyn Layer<_> + Send + Sync> = if config.json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    let file_layer = config.file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()?;
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .boxed(),
        )
    });

    let subscriber = Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only the first call installs a global subscriber; the point here is
    // that both output shapes construct without panicking.
    #[test]
    fn test_init_logging_accepts_both_output_shapes() {
        init_logging(&LoggingConfig {
            level: "debug".to_string(),
            json: true,
            file: None,
        });
        init_logging(&LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: None,
        });
    }

    #[test]
    fn test_init_logging_with_file_creates_parent_directory() {
        let dir = std::env::temp_dir().join("reelsmith_test_logging_file");
        let _ = std::fs::remove_dir_all(&dir);

        init_logging(&LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(dir.join("logs").join("reelsmith.log")),
        });
        assert!(dir.join("logs").join("reelsmith.log").exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
