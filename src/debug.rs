/// Debug log for notetab
///
/// Every `log` record is routed to `notetab_debug.log` in the system temp
/// directory (`/tmp` on Unix, `%TEMP%` on Windows), so diagnostics never mix
/// with the interactive shell's output. The file is created on the first
/// record written, so `off` never touches it. When `RUST_LOG` is set, records
/// are mirrored to stderr as well.
///
/// Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
/// file's `log_level` (applied after the config is loaded).
use chrono::Utc;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Location of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("notetab_debug.log")
}

struct LogBridge {
    path: PathBuf,
    /// Opened on the first record, so a silent session never creates it
    file: OnceLock<Option<Mutex<File>>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn new(path: PathBuf, mirror_stderr: bool) -> Self {
        Self {
            path,
            file: OnceLock::new(),
            mirror_stderr,
        }
    }

    fn write_line(&self, line: &str) {
        let file = self.file.get_or_init(|| {
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(&self.path)
                .ok()
                .map(Mutex::new)
        });
        if let Some(file) = file {
            let _ = file.lock().write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_line(&format_line(
            &timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        ));
    }

    fn flush(&self) {
        if let Some(Some(file)) = self.file.get() {
            let _ = file.lock().flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the flag or `RUST_LOG` chose the level; config then defers
static LEVEL_OVERRIDDEN: AtomicBool = AtomicBool::new(false);

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// One log line as written to the file
pub fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    format!("[{}] [{:<5}] [{}] {}\n", timestamp, level, target, msg)
}

/// Parse a `RUST_LOG` value into a single level
///
/// Accepts a bare level (`debug`) or directives (`notetab=debug`), in which
/// case the last directive's level wins. Anything else means `Info`.
pub fn parse_rust_log(value: &str) -> LevelFilter {
    let last = value.rsplit(',').next().unwrap_or(value);
    let level = last.rsplit('=').next().unwrap_or(last).trim();
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Install the log bridge
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = match (cli_level, rust_log.as_deref()) {
        (Some(level), _) => Some(level),
        (None, Some(value)) => Some(parse_rust_log(value)),
        (None, None) => None,
    };
    LEVEL_OVERRIDDEN.store(level.is_some(), Ordering::Relaxed);

    let bridge = BRIDGE.get_or_init(|| LogBridge::new(log_path(), rust_log.is_some()));

    if log::set_logger(bridge).is_ok() {
        log::set_max_level(level.unwrap_or(LevelFilter::Off));
        log::info!(
            "notetab {} debug session started (level={})",
            crate::VERSION,
            log::max_level()
        );
    }
}

/// Change the level at runtime
pub fn set_log_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Apply the config file's level unless the flag or `RUST_LOG` chose one
pub fn apply_config_level(level: LevelFilter) {
    if LEVEL_OVERRIDDEN.load(Ordering::Relaxed) {
        log::debug!("Keeping log level {}; config asks for {}", log::max_level(), level);
        return;
    }
    set_log_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line("2024-01-01 00:00:00.000", log::Level::Warn, "notetab::editor", "hi");
        assert_eq!(
            line,
            "[2024-01-01 00:00:00.000] [WARN ] [notetab::editor] hi\n"
        );
    }

    #[test]
    fn test_parse_rust_log() {
        assert_eq!(parse_rust_log("debug"), LevelFilter::Debug);
        assert_eq!(parse_rust_log("TRACE"), LevelFilter::Trace);
        assert_eq!(parse_rust_log("notetab=warn"), LevelFilter::Warn);
        assert_eq!(parse_rust_log("tokio=info,notetab=error"), LevelFilter::Error);
        assert_eq!(parse_rust_log("garbage"), LevelFilter::Info);
    }

    #[test]
    fn test_log_path_is_in_temp_dir() {
        let path = log_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert_eq!(path.file_name().unwrap(), "notetab_debug.log");
    }

    #[test]
    fn test_log_file_created_on_first_record_only() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("debug.log");
        let bridge = LogBridge::new(path.clone(), false);

        bridge.flush();
        assert!(!path.exists());

        bridge.write_line("first\n");
        bridge.write_line("second\n");
        bridge.flush();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
