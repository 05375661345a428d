pub mod clock;
pub mod config;
pub mod console_sink;
pub mod context;
pub mod file_sink;
pub mod format;
pub mod null_sink;
pub mod registry;
pub mod sink;
pub mod types;

pub use clock::*;
pub use config::BackendConfig;
pub use console_sink::ConsoleSink;
pub use context::{LoggingContext, install};
pub use file_sink::FileSink;
pub use format::format_line;
pub use null_sink::NullSink;
pub use registry::{Creator, Registry};
pub use sink::Sink;
pub use types::*;
