use crate::logging::clock::{Clock, SystemClock};
use crate::logging::config::BackendConfig;
use crate::logging::format::format_line;
use crate::logging::sink::Sink;
use crate::logging::types::{LogError, Severity};
use chrono::{DateTime, Local, TimeDelta};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Reopen interval used when none is configured: ten years.
pub const NEVER_REOPEN_SECS: u64 = 60 * 60 * 24 * 365 * 10;

/// FileSink appends every message to a file and closes and reopens that file
/// once per `reopen_interval`, so an external tool can rename the old file
/// away without the writer holding on to it.
///
/// Writers hold the handle lock shared; a reopen holds it exclusively, so no
/// line is ever written to a handle that is being replaced.
pub struct FileSink {
    path: PathBuf,
    file: RwLock<File>,
    reopen_interval: TimeDelta,
    // microseconds since the epoch; only advanced while `file` is held exclusively
    next_reopen: AtomicI64,
    reopens: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl FileSink {
    pub fn new(conf: &BackendConfig) -> Result<Self, LogError> {
        Self::with_clock(conf, Arc::new(SystemClock))
    }

    pub fn with_clock(conf: &BackendConfig, clock: Arc<dyn Clock>) -> Result<Self, LogError> {
        let path = conf.location.clone().ok_or_else(|| {
            LogError::Configuration("Location parameter not provided for file logging target.".into())
        })?;
        let secs = conf.reopen_interval.unwrap_or(NEVER_REOPEN_SECS);
        let reopen_interval = i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| LogError::Configuration(format!("reopen_interval {secs} is too large")))?;

        let file = open_append(&path).map_err(|source| LogError::Open {
            path: path.clone(),
            source,
        })?;
        let next_reopen = clock
            .now()
            .timestamp_micros()
            .saturating_add(interval_micros(reopen_interval));

        log::debug!(
            "opened log file {} (reopen every {}s)",
            path.display(),
            reopen_interval.num_seconds()
        );

        Ok(Self {
            path,
            file: RwLock::new(file),
            reopen_interval,
            next_reopen: AtomicI64::new(next_reopen),
            reopens: AtomicU64::new(0),
            clock,
        })
    }

    /// Registry constructor for the `file` tag.
    pub fn create(conf: &BackendConfig) -> Result<Box<dyn Sink>, LogError> {
        Ok(Box::new(Self::new(conf)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reopen_interval(&self) -> TimeDelta {
        self.reopen_interval
    }

    /// The instant at or after which the next call reopens the file.
    pub fn next_reopen(&self) -> DateTime<Local> {
        let micros = self.next_reopen.load(Ordering::Acquire);
        DateTime::from_timestamp_micros(micros)
            .unwrap_or(DateTime::<chrono::Utc>::MAX_UTC)
            .with_timezone(&Local)
    }

    /// Number of reopens performed since construction.
    pub fn reopen_count(&self) -> u64 {
        self.reopens.load(Ordering::Relaxed)
    }

    fn reopen_due(&self, now: &DateTime<Local>) -> bool {
        now.timestamp_micros() >= self.next_reopen.load(Ordering::Acquire)
    }

    /// Slow path of the rotation gate. Re-checks the deadline under the
    /// exclusive lock since another caller may have rotated in the meantime.
    fn rotate(&self) -> Result<(), LogError> {
        let mut file = self.file.write().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        if !self.reopen_due(&now) {
            return Ok(());
        }

        // the old handle stays in place until the new one is open
        let reopened = open_append(&self.path).map_err(|source| LogError::Reopen {
            path: self.path.clone(),
            source,
        })?;
        *file = reopened;

        // one interval per reopen, even if several have elapsed
        let deadline = self.next_reopen.load(Ordering::Acquire);
        self.next_reopen.store(
            deadline.saturating_add(interval_micros(self.reopen_interval)),
            Ordering::Release,
        );
        self.reopens.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl Sink for FileSink {
    fn log(&self, level: Severity, message: &str) -> Result<(), LogError> {
        let now = self.clock.now();
        if self.reopen_due(&now) {
            self.rotate()?;
        }

        let line = format_line(&now, level, message);
        let file = self.file.read().unwrap_or_else(PoisonError::into_inner);
        let mut handle: &File = &file;
        handle
            .write_all(line.as_bytes())
            .and_then(|()| handle.flush())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn interval_micros(interval: TimeDelta) -> i64 {
    interval.num_microseconds().unwrap_or(i64::MAX)
}
