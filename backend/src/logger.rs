use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::get_project_dir;

/// Log levels representing increasing verbosity.
///
/// Setting a level enables that level and all less verbose levels below it:
///
/// - **Silent (0)**: No logging output
/// - **Error (1)**: Only error messages
/// - **Warn (2)**: Warning and error messages
/// - **Info (3)**: Informational, warning, and error messages (default)
/// - **Debug (4)**: All messages including debug output
///
/// The level is read from the `LOG_LEVEL` environment variable. Without
/// `RUST_LOG`, the tracing filter follows the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Level {
    /// Parse a log level from a string (case insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" => Some(Level::Silent),
            "error" => Some(Level::Error),
            "warn" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Silent => "Silent",
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Info => "Info",
            Level::Debug => "Debug",
        }
    }

    /// Default tracing filter directive when RUST_LOG is not set.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Level::Silent => "off",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(default)
}

pub struct Logger {
    log_file: Arc<Mutex<PathBuf>>,
    disable_log: bool,
    enable_print_log: bool,
    level: Arc<Mutex<Level>>,
}

impl Logger {
    pub fn new() -> Self {
        let level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| Level::from_str(&v))
            .unwrap_or(Level::Info);

        Logger {
            log_file: Arc::new(Mutex::new(get_project_dir().join("log.txt"))),
            disable_log: env_flag("DISABLE_LOG", false),
            enable_print_log: env_flag("ENABLE_PRINT_LOG", true),
            level: Arc::new(Mutex::new(level)),
        }
    }

    pub fn init_tracing(level: Level) -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stdout)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(())
    }

    fn write_to_file(&self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        if self.disable_log {
            return Ok(());
        }

        let log_file = self.get_log_file();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3fZ");
        let log_line = format!("[{}] {}\n", timestamp, message);

        file.write_all(log_line.as_bytes())?;

        Ok(())
    }

    fn is_enabled(&self, required: Level) -> bool {
        match self.level.lock() {
            Ok(level) => *level >= required,
            Err(_) => true,
        }
    }

    fn log(&self, required: Level, msg: &str) {
        if !self.is_enabled(required) {
            return;
        }

        if self.enable_print_log {
            match required {
                Level::Debug => tracing::debug!("{}", msg),
                Level::Info => tracing::info!("{}", msg),
                Level::Warn => tracing::warn!("{}", msg),
                Level::Error => tracing::error!("{}", msg),
                Level::Silent => {}
            }
        }

        let formatted_msg = format!("{}: {}", required.as_str().to_uppercase(), msg);
        if let Err(e) = self.write_to_file(&formatted_msg) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }

    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    /// Returns Level::Info if the lock is poisoned.
    pub fn get_level(&self) -> Level {
        self.level.lock().map(|l| *l).unwrap_or(Level::Info)
    }

    pub fn set_level(&self, new_level: Level) {
        if let Ok(mut level) = self.level.lock() {
            *level = new_level;
        }
    }

    pub fn get_log_file(&self) -> PathBuf {
        self.log_file.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn set_log_file(&self, path: PathBuf) {
        if let Ok(mut log_file) = self.log_file.lock() {
            *log_file = path;
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

pub static LOGGER: OnceLock<Logger> = OnceLock::new();
static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

fn with_logger<F, R>(f: F) -> R
where
    F: FnOnce(&Logger) -> R,
{
    let logger = LOGGER.get_or_init(Logger::new);

    TRACING_INITIALIZED.get_or_init(|| {
        // Fails when a subscriber was already installed, e.g. by a test harness.
        let _ = Logger::init_tracing(logger.get_level());
    });

    f(logger)
}

pub fn info(msg: &str) {
    with_logger(|logger| logger.info(msg));
}

pub fn warn(msg: &str) {
    with_logger(|logger| logger.warn(msg));
}

pub fn error(msg: &str) {
    with_logger(|logger| logger.error(msg));
}

pub fn debug(msg: &str) {
    with_logger(|logger| logger.debug(msg));
}

/// Redirects log.txt, e.g. into the project dir of a bootstrap run.
pub fn set_log_file(path: &Path) {
    with_logger(|logger| logger.set_log_file(path.to_path_buf()));
}

pub fn get_log_file() -> PathBuf {
    with_logger(|logger| logger.get_log_file())
}

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
