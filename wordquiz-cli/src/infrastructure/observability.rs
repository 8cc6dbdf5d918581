use super::error::{CliError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub show_targets: bool,
    pub show_thread_ids: bool,
    pub show_logs: bool,
    pub compact: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            show_targets: true,
            show_thread_ids: false,
            show_logs: true,
            compact: false,
        }
    }
}

impl LogConfig {
    /// Development configuration (per-message routing, thread ids)
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            show_thread_ids: true,
            ..Default::default()
        }
    }

    /// Only warnings and errors, e.g. for `schema` output piped to a file
    pub fn quiet() -> Self {
        Self {
            default_level: tracing::Level::WARN,
            compact: true,
            ..Default::default()
        }
    }

    pub fn without_logs(mut self) -> Self {
        self.show_logs = false;
        self
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.default_level = level;
        self
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn default_directives(&self) -> String {
        ["wordquiz_cli", "wordquiz_core", "wordquiz_p2p"]
            .iter()
            .map(|target| format!("{}={}", target, self.default_level))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn init(self) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()));

        let registry = tracing_subscriber::registry().with(env_filter);

        let result = if !self.show_logs {
            registry.try_init()
        } else if self.compact {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(self.show_targets)
                        .compact(),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(self.show_targets)
                        .with_thread_ids(self.show_thread_ids),
                )
                .try_init()
        };

        result.map_err(|e| CliError::Logging(e.to_string()))
    }
}
