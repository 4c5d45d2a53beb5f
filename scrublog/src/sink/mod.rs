//! Output destinations for encoded log records.
//!
//! A [`Sink`] receives one encoded record per write. Sinks are synchronous
//! and shared: the logger fans every record out to all of its sinks, and a
//! failing sink never fails the logging call; failures are reported on the
//! process diagnostic channel instead.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpSink;

/// Error type for sink writes.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http transport error: {0}")]
    Transport(String),
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),
}

/// A destination for encoded log records.
pub trait Sink: Send + Sync {
    /// Writes one encoded record.
    fn write(&self, record: &str) -> Result<(), SinkError>;

    /// Flushes any buffered data.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

// =============================================================================
// ConsoleSink - stdout/stderr
// =============================================================================

#[derive(Clone, Copy, Debug)]
enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes records to the process console, one per line.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    /// A sink writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    /// A sink writing to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
        }
    }
}

impl Sink for ConsoleSink {
    fn write(&self, record: &str) -> Result<(), SinkError> {
        match self.target {
            ConsoleTarget::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(record.as_bytes())?;
                out.write_all(b"\n")?;
            }
            ConsoleTarget::Stderr => {
                let mut out = io::stderr().lock();
                out.write_all(record.as_bytes())?;
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().lock().flush()?,
            ConsoleTarget::Stderr => io::stderr().lock().flush()?,
        }
        Ok(())
    }
}

// =============================================================================
// FileSink - append-only log file
// =============================================================================

/// Appends records to a file, one per line, through a buffered writer.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Opens (or creates) the file for appending. Parent directories are
    /// created as needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(BufWriter::new(file)),
        })
    }

    /// The file this sink appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, record: &str) -> Result<(), SinkError> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(record.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush()?;
        Ok(())
    }
}

// =============================================================================
// MemorySink - in-memory capture
// =============================================================================

/// Captures records in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the logger
/// and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the captured records, in write order.
    #[must_use]
    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discards all captured records.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, record: &str) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.to_owned());
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
