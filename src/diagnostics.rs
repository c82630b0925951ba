//! Append-only diagnostic log for correction failures.
//!
//! Every record is one line of the form
//! `2024-05-01 10:30:00,123 - ERROR - Timeout na requisição`, matching the
//! classic `asctime - levelname - message` layout.  Records are also
//! forwarded to the `log` facade so they show up in the console output.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Render one log line (without the trailing newline).
pub fn format_record(timestamp: NaiveDateTime, level: log::Level, message: &str) -> String {
    format!(
        "{} - {} - {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level,
        message
    )
}

/// Thread-safe, append-only sink for failure records.
pub struct DiagnosticLog {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl DiagnosticLog {
    /// Open (or create) `path` in append mode, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(file))
    }

    /// Wrap an arbitrary writer.
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }

    /// A log that discards its records (they still reach the `log` facade).
    pub fn discard() -> Self {
        Self::from_writer(std::io::sink())
    }

    /// Append one record stamped with the current local time.
    ///
    /// Write failures are reported through `log::warn!` and otherwise
    /// swallowed; a broken log file must never fail a correction.
    pub fn record(&self, level: log::Level, message: &str) {
        log::log!(level, "{message}");

        let line = format_record(chrono::Local::now().naive_local(), level, message);
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "{line}").and_then(|_| sink.flush()) {
            log::warn!("could not write diagnostic log record: {e}");
        }
    }

    /// Shorthand for `record(Level::Error, message)`.
    pub fn error(&self, message: &str) {
        self.record(log::Level::Error, message);
    }

    /// A log backed by memory, plus a handle to read back what was written.
    #[cfg(test)]
    pub fn captured() -> (Self, CapturedLog) {
        let captured = CapturedLog::default();
        (Self::from_writer(captured.clone()), captured)
    }
}

impl std::fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticLog").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// CapturedLog  (test-only)
// ---------------------------------------------------------------------------

/// In-memory writer whose contents can be inspected from tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct CapturedLog {
    buf: std::sync::Arc<Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl CapturedLog {
    /// All complete lines written so far.
    pub fn lines(&self) -> Vec<String> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
impl Write for CapturedLog {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
