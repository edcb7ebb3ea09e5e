//! Tracing subscriber setup.
//!
//! Console output is filtered by `RUST_LOG` (falling back to the supplied
//! level); an optional daily rolling file goes to `<data_dir>/logs`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{AppError, AppResult};

const LOG_FILE_PREFIX: &str = "quizpilot.log";

/// Install the global subscriber.
///
/// Keep the returned guard alive for the process lifetime, otherwise buffered
/// file output is lost.
pub fn init_logging(default_level: &str, log_dir: Option<&Path>) -> AppResult<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let console = fmt::layer().with_target(false);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| AppError::Logging(e.to_string()))?;
            Ok(Some(guard))
        },
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init()
                .map_err(|e| AppError::Logging(e.to_string()))?;
            Ok(None)
        },
    }
}
