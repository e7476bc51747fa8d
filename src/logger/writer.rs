//! Log writer module
//!
//! Thread-safe log writing to files or stdout/stderr. File targets can be
//! reopened at runtime so external log rotation works.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File { path: String, file: File },
}

impl LogTarget {
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File {
                path: p.to_string(),
                file: open_log_file(p)?,
            }),
            None => Ok(fallback),
        }
    }

    fn write_line(&mut self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File { file, .. } => {
                let _ = writeln!(file, "{message}");
            }
        }
    }

    fn reopen(&mut self) -> io::Result<()> {
        if let Self::File { path, file } = self {
            *file = open_log_file(path)?;
        }
        Ok(())
    }
}

/// Thread-safe log writer
pub struct LogWriter {
    access: Mutex<LogTarget>,
    error: Mutex<LogTarget>,
}

impl LogWriter {
    /// Create a new log writer with optional file paths
    fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        Self::with_access_fallback(access_log_file, error_log_file, LogTarget::Stdout)
    }

    fn with_access_fallback(
        access_log_file: Option<&str>,
        error_log_file: Option<&str>,
        access_fallback: LogTarget,
    ) -> io::Result<Self> {
        Ok(Self {
            access: Mutex::new(LogTarget::open(access_log_file, access_fallback)?),
            error: Mutex::new(LogTarget::open(error_log_file, LogTarget::Stderr)?),
        })
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        lock(&self.access).write_line(message);
    }

    /// Write to error log
    pub fn write_error(&self, message: &str) {
        lock(&self.error).write_line(message);
    }

    /// Write info message (to access log target)
    pub fn write_info(&self, message: &str) {
        lock(&self.access).write_line(message);
    }

    /// Reopen file targets at their configured paths
    pub fn reopen(&self) -> io::Result<()> {
        lock(&self.access).reopen()?;
        lock(&self.error).reopen()
    }
}

// A panic while holding the lock leaves the target usable
fn lock(target: &Mutex<LogTarget>) -> MutexGuard<'_, LogTarget> {
    target
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if log files cannot be opened.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    install(LogWriter::new(access_log_file, error_log_file)?)
}

/// Like [`init`], but info and access lines default to stderr
///
/// Used when stdout carries program output.
pub fn init_stderr(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    install(LogWriter::with_access_fallback(
        access_log_file,
        error_log_file,
        LogTarget::Stderr,
    )?)
}

fn install(writer: LogWriter) -> io::Result<()> {
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer
///
/// Panics if `init()` has not been called; check [`is_initialized`] first.
pub fn get() -> &'static LogWriter {
    LOG_WRITER
        .get()
        .expect("Log writer not initialized. Call logger::writer::init() first.")
}

/// Check if the log writer has been initialized
pub fn is_initialized() -> bool {
    LOG_WRITER.get().is_some()
}
