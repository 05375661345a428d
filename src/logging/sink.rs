use crate::logging::types::{LogError, Severity};

/// A destination for formatted log lines.
///
/// Implementations release their resources on drop.
pub trait Sink: Send + Sync {
    /// Append one message at the given severity.
    fn log(&self, level: Severity, message: &str) -> Result<(), LogError>;
}
