use crate::logging::config::BackendConfig;
use crate::logging::console_sink::ConsoleSink;
use crate::logging::file_sink::FileSink;
use crate::logging::null_sink::NullSink;
use crate::logging::sink::Sink;
use crate::logging::types::LogError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Builds a sink from its configuration.
pub type Creator = Box<dyn Fn(&BackendConfig) -> Result<Box<dyn Sink>, LogError> + Send + Sync>;

/// Maps a backend type tag to the constructor for that backend.
#[derive(Default)]
pub struct Registry {
    creators: HashMap<String, Creator>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `file`, `null` and `stdout` backends.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("file", FileSink::create);
        registry.register("null", NullSink::create);
        registry.register("stdout", ConsoleSink::create);
        registry
    }

    /// Register a constructor under `tag`. Returns false, leaving the existing
    /// constructor in place, if the tag is taken.
    pub fn register<F>(&mut self, tag: &str, creator: F) -> bool
    where
        F: Fn(&BackendConfig) -> Result<Box<dyn Sink>, LogError> + Send + Sync + 'static,
    {
        match self.creators.entry(tag.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(Box::new(creator));
                true
            }
            Entry::Occupied(_) => {
                log::warn!("logging backend {tag:?} is already registered");
                false
            }
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.creators.contains_key(tag)
    }

    /// Build the backend named by the configuration's `type` key.
    ///
    /// A missing or unregistered type yields `Ok(None)` so callers can fall
    /// back to a default; construction failures are returned as errors.
    pub fn create(&self, conf: &BackendConfig) -> Result<Option<Box<dyn Sink>>, LogError> {
        let Some(creator) = conf.kind.as_deref().and_then(|tag| self.creators.get(tag)) else {
            return Ok(None);
        };
        creator(conf).map(Some)
    }
}
