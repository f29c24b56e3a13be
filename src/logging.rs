//! File-based logging for movie-search
//!
//! The TUI owns the terminal, so tracing output goes to a rolling log file
//! instead of stdout.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "movie-search";

/// Initialize the logging system.
///
/// Logs are written to `.logs/movie-search.YYYY-MM-DD.log` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `movie_search` modules: DEBUG
/// - `tmdb` (API calls made by the search client): DEBUG
/// - `reqwest`: INFO
/// - Other crates: WARN
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    // Non-blocking so a slow disk never stalls the render loop
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; it has to live as long as the process
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("movie_search=debug,tmdb=debug,reqwest=info,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(())
}

// TMDB calls log under the `tmdb` target so `RUST_LOG=tmdb=trace` isolates
// them from the UI noise.

/// Log the outcome of a TMDB search call: page size on success, error kind on failure
#[macro_export]
macro_rules! log_api_result {
    ($endpoint:expr, $result:expr) => {
        match &$result {
            Ok(page) => tracing::info!(
                target: "tmdb",
                endpoint = $endpoint,
                items = page.items.len(),
                total_pages = page.total_pages,
                "TMDB request successful"
            ),
            Err(e) => tracing::error!(
                target: "tmdb",
                endpoint = $endpoint,
                kind = ?e.kind(),
                error = %e,
                "TMDB request failed"
            ),
        }
    };
}

/// Log a TMDB request before it is sent
#[macro_export]
macro_rules! log_api_request {
    ($endpoint:expr, $($field:tt)*) => {
        tracing::debug!(target: "tmdb", endpoint = $endpoint, $($field)*, "TMDB request started");
    };
}
