use std::io;
use configs::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

/// Initialize tracing subscriber from the `[logging]` section with stdout writer.
/// - Respects `RUST_LOG` if set, then `logging.filter`
/// - Falls back to `info,sqlx=warn,sea_orm=warn`
/// - `format = "json"` emits structured JSON lines, otherwise compact text
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.filter.as_deref().unwrap_or(DEFAULT_FILTER)));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);
    let _ = match cfg.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
