use crate::logging::config::BackendConfig;
use crate::logging::sink::Sink;
use crate::logging::types::{LogError, Severity};

/// Discards everything. Stands in wherever no destination is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    pub fn create(_conf: &BackendConfig) -> Result<Box<dyn Sink>, LogError> {
        Ok(Box::new(NullSink))
    }
}

impl Sink for NullSink {
    #[inline]
    fn log(&self, _level: Severity, _message: &str) -> Result<(), LogError> {
        Ok(())
    }
}
