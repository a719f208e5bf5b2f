use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directive when neither `RUST_LOG` nor a configured filter is present.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a config value; anything other than `json` means compact.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

fn env_filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or(DEFAULT_FILTER)))
}

/// Initialize tracing with the given format, writing to stdout.
/// `RUST_LOG` wins over `fallback`, and `fallback` over [`DEFAULT_FILTER`].
/// Repeated calls are no-ops.
pub fn init_logging(format: LogFormat, fallback: Option<&str>) {
    let builder = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
