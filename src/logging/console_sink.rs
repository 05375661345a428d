use crate::logging::clock::{Clock, SystemClock};
use crate::logging::config::BackendConfig;
use crate::logging::format::format_line;
use crate::logging::sink::Sink;
use crate::logging::types::{LogError, Severity};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Writes lines to standard output, or to any writer handed to `with_writer`.
pub struct ConsoleSink {
    clock: Arc<dyn Clock>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_writer(clock, Box::new(io::stdout()))
    }

    pub fn with_writer(clock: Arc<dyn Clock>, out: Box<dyn Write + Send>) -> Self {
        Self {
            clock,
            out: Mutex::new(out),
        }
    }

    pub fn create(_conf: &BackendConfig) -> Result<Box<dyn Sink>, LogError> {
        Ok(Box::new(Self::new()))
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn log(&self, level: Severity, message: &str) -> Result<(), LogError> {
        let line = format_line(&self.clock.now(), level, message);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
