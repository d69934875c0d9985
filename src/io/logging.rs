use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::io::paths;

/// Set to `true` to log at debug level when `RUST_LOG` is unset
pub const DEBUG_ENV: &str = "LANES_DEBUG";

const DEFAULT_FILTER: &str = "lanes=info";
const DEBUG_FILTER: &str = "lanes=debug";

/// Route tracing output to `<config dir>/app.log`.
///
/// The terminal belongs to the board while it runs, so nothing is written to
/// stderr. If the log file can't be opened, events are discarded.
pub fn init_logging(config_dir: Option<&Path>) {
    let writer = config_dir
        .and_then(|dir| open_log_writer(dir))
        .unwrap_or_else(|| BoxMakeWriter::new(std::io::sink));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}

/// Log file location for the resolved config directory
pub fn log_path() -> Option<std::path::PathBuf> {
    paths::config_dir().map(|dir| paths::log_file(&dir))
}

fn default_filter() -> &'static str {
    match std::env::var(DEBUG_ENV) {
        Ok(v) if v.eq_ignore_ascii_case("true") || v == "1" => DEBUG_FILTER,
        _ => DEFAULT_FILTER,
    }
}

fn open_log_writer(dir: &Path) -> Option<BoxMakeWriter> {
    fs::create_dir_all(dir).ok()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::log_file(dir))
        .ok()?;
    Some(BoxMakeWriter::new(Mutex::new(file)))
}
