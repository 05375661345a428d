use crate::logging::config::BackendConfig;
use crate::logging::null_sink::NullSink;
use crate::logging::registry::Registry;
use crate::logging::sink::Sink;
use crate::logging::types::{LogError, Severity};
use std::sync::{Arc, PoisonError, RwLock};

/// Holds the active sink and the registry used to replace it.
///
/// Callers clone the active sink out from under the lock before writing, so a
/// swapped-out sink is only dropped once every in-flight call on it returns.
pub struct LoggingContext {
    registry: Registry,
    sink: RwLock<Arc<dyn Sink>>,
}

impl LoggingContext {
    /// Create a context that discards everything until configured.
    pub fn new(registry: Registry) -> Self {
        Self::with_sink(registry, Arc::new(NullSink))
    }

    pub fn with_sink(registry: Registry, sink: Arc<dyn Sink>) -> Self {
        Self {
            registry,
            sink: RwLock::new(sink),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The currently active sink.
    pub fn sink(&self) -> Arc<dyn Sink> {
        self.sink.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Install `sink` as the active sink and hand back the previous one.
    pub fn swap(&self, sink: Arc<dyn Sink>) -> Arc<dyn Sink> {
        let mut current = self.sink.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, sink)
    }

    /// Build a new sink from `conf` and make it active.
    ///
    /// On failure the existing sink stays active and receives a warning.
    pub fn configure(&self, conf: &BackendConfig) -> Result<(), LogError> {
        let built = self.registry.create(conf).and_then(|sink| {
            sink.ok_or_else(|| LogError::UnknownBackend(conf.kind.clone().unwrap_or_default()))
        });
        match built {
            Ok(sink) => {
                drop(self.swap(Arc::from(sink)));
                self.finer("Logging reconfigured.")
            }
            Err(e) => {
                // the reconfiguration error is the one worth reporting
                let _ = self.warning("Logging could not be reconfigured.");
                Err(e)
            }
        }
    }

    pub fn log(&self, level: Severity, message: &str) -> Result<(), LogError> {
        self.sink().log(level, message)
    }

    pub fn finer(&self, message: &str) -> Result<(), LogError> {
        self.log(Severity::Finer, message)
    }

    pub fn debug(&self, message: &str) -> Result<(), LogError> {
        self.log(Severity::Debug, message)
    }

    pub fn info(&self, message: &str) -> Result<(), LogError> {
        self.log(Severity::Info, message)
    }

    pub fn warning(&self, message: &str) -> Result<(), LogError> {
        self.log(Severity::Warning, message)
    }

    pub fn error(&self, message: &str) -> Result<(), LogError> {
        self.log(Severity::Error, message)
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new(Registry::with_builtin())
    }
}

impl log::Log for LoggingContext {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let message = record.args().to_string();
        if let Err(e) = LoggingContext::log(self, record.level().into(), &message) {
            // no other channel is left to report on
            eprintln!("{e}");
        }
    }

    fn flush(&self) {}
}

/// Route records from the `log` macros into `context`. Fails if a `log`
/// backend is already installed for this process.
pub fn install(context: Arc<LoggingContext>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(context))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
