//! Rolling Logger
//!
//! File logger for the app process:
//! - writes formatted `tracing` events (and bridged `log` records) to
//!   `<dir>/<app_name>.log`, rotating to `.1`, `.2`, ... once the file
//!   grows past a size limit
//! - keeps the most recent lines in a circular buffer so they can be
//!   shown in-app without touching the file system
//!
//! On Android the platform logger is used instead of the file sink.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use thiserror::Error;

/// Rotate once the active file would grow past this many bytes
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Number of rotated files kept next to the active one
pub const DEFAULT_MAX_FILES: usize = 3;
/// Lines kept in memory
pub const DEFAULT_RING_CAPACITY: usize = 500;

static LOGGER: OnceCell<RollingWriter> = OnceCell::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

struct Inner {
    path: PathBuf,
    file: File,
    written: u64,
    max_file_bytes: u64,
    max_files: usize,
    ring: VecDeque<String>,
    ring_capacity: usize,
    // Bytes of a line not yet terminated by '\n'
    partial: String,
}

impl Inner {
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_files > 0 {
            let oldest = archive_path(&self.path, self.max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for idx in (1..self.max_files).rev() {
                let from = archive_path(&self.path, idx);
                if from.exists() {
                    fs::rename(&from, archive_path(&self.path, idx + 1))?;
                }
            }
            fs::rename(&self.path, archive_path(&self.path, 1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            let line = line.trim_end_matches(['\r', '\n']).to_string();
            if self.ring.len() == self.ring_capacity {
                self.ring.pop_front();
            }
            if self.ring_capacity > 0 {
                self.ring.push_back(line);
            }
        }
    }
}

fn archive_path(path: &Path, idx: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}", idx));
    PathBuf::from(name)
}

/// Size-rotated log file plus in-memory tail.
///
/// Cheap to clone; all clones share the same file and buffer.
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    /// Open `<dir>/<app_name>.log` with the default limits
    pub fn open(dir: impl AsRef<Path>, app_name: &str) -> Result<Self, LoggerError> {
        Self::with_limits(
            dir,
            app_name,
            DEFAULT_MAX_FILE_BYTES,
            DEFAULT_MAX_FILES,
            DEFAULT_RING_CAPACITY,
        )
    }

    pub fn with_limits(
        dir: impl AsRef<Path>,
        app_name: &str,
        max_file_bytes: u64,
        max_files: usize,
        ring_capacity: usize,
    ) -> Result<Self, LoggerError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                path,
                file,
                written,
                max_file_bytes,
                max_files,
                ring: VecDeque::with_capacity(ring_capacity),
                ring_capacity,
                partial: String::new(),
            })),
        })
    }

    /// Path of the active log file
    pub fn log_path(&self) -> PathBuf {
        match self.inner.lock() {
            Ok(inner) => inner.path.clone(),
            Err(poisoned) => poisoned.into_inner().path.clone(),
        }
    }

    /// Most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => inner.ring.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().ring.iter().cloned().collect(),
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;

        if inner.written > 0 && inner.written + buf.len() as u64 > inner.max_file_bytes {
            inner.rotate()?;
        }

        inner.file.write_all(buf)?;
        inner.written += buf.len() as u64;
        inner.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        inner.file.flush()
    }
}

/// Local wall-clock timestamps for log lines
struct LocalTimer;

impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize process-wide logging into `log_dir`.
///
/// Can only be called once per process.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    let writer = RollingWriter::open(log_dir, app_name)?;
    LOGGER
        .set(writer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    #[cfg(target_os = "android")]
    {
        let _ = writer;
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Info)
                .with_tag(app_name),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        use tracing_subscriber::filter::LevelFilter;
        use tracing_subscriber::{fmt, prelude::*};

        let file_layer = fmt::layer()
            .with_writer(move || writer.clone())
            .with_timer(LocalTimer)
            .with_ansi(false)
            .with_target(true);

        let console_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_timer(LocalTimer)
            .with_target(false);

        tracing_subscriber::registry()
            .with(LevelFilter::INFO)
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .map_err(|e| LoggerError::Subscriber(e.to_string()))?;
    }

    log::info!("logger initialized for {}", app_name);
    Ok(())
}

// The helpers go through `log` so they reach android_logger as well as the
// tracing subscriber (which bridges `log` records on desktop).

pub fn info(msg: &str) -> Result<(), LoggerError> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)?;
    log::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)?;
    log::error!("{}", msg);
    Ok(())
}

/// Recent lines of the process-wide logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}
