//! Logging bridge for par-ligature.
//!
//! Routes the `log` facade to stderr or to a log file. The level comes from
//! (highest precedence first) the CLI `--log-level` flag or the `DEBUG_LEVEL`
//! environment variable:
//! - 0 or unset: No logging
//! - 1: Errors and warnings
//! - 2: Info level (config loading, registration summaries)
//! - 3: Debug level (per-set registration, table generation, cache invalidation)
//! - 4: Trace level (selector resolution)
//!
//! Setting `PAR_LIGATURE_LOG_FILE` sends output to that file instead of stderr.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => DebugLevel::Off,
            1 => DebugLevel::Error,
            2 => DebugLevel::Info,
            3 => DebugLevel::Debug,
            _ => DebugLevel::Trace,
        }
    }

    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => match val.trim().parse::<u8>() {
                Ok(level) => DebugLevel::from_u8(level),
                Err(_) => DebugLevel::Off,
            },
            Err(_) => DebugLevel::Off,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            DebugLevel::Off => LevelFilter::Off,
            DebugLevel::Error => LevelFilter::Warn,
            DebugLevel::Info => LevelFilter::Info,
            DebugLevel::Debug => LevelFilter::Debug,
            DebugLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// `log::Log` implementation writing timestamped lines.
struct LogBridge {
    level: LevelFilter,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let mut sink = self.sink.lock();
        // Logging must never take the process down
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

static LOGGER: OnceLock<LogBridge> = OnceLock::new();

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn open_sink() -> Box<dyn Write + Send> {
    if let Ok(path) = std::env::var("PAR_LIGATURE_LOG_FILE") {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => return Box::new(file),
            Err(e) => eprintln!("par-ligature: cannot open log file {path}: {e}"),
        }
    }
    Box::new(std::io::stderr())
}

/// Install the log bridge. `cli_level` overrides `DEBUG_LEVEL`.
///
/// Calling this more than once keeps the first installation.
pub fn init_log_bridge(cli_level: Option<u8>) -> DebugLevel {
    let level = cli_level.map_or_else(DebugLevel::from_env, DebugLevel::from_u8);
    let filter = level.to_level_filter();

    let logger = LOGGER.get_or_init(|| LogBridge {
        level: filter,
        sink: Mutex::new(open_sink()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(filter);
    }
    level
}
