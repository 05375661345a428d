use rotating_logger::logging::{BackendConfig, LoggingContext, Registry, install};
use std::fs;
use std::sync::Arc;

// Installing is process-wide, so this file holds a single test.
#[test]
fn log_macros_reach_the_active_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let ctx = Arc::new(LoggingContext::new(Registry::with_builtin()));
    install(ctx.clone()).unwrap();

    ctx.configure(&BackendConfig::new("file").with_location(&path))
        .unwrap();
    log::info!("queue depth {}", 3);
    log::trace!("fine detail");
    log::error!("render failed");

    assert!(install(ctx.clone()).is_err());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[INFO]  queue depth 3\n"));
    assert!(text.contains("[FINER] fine detail\n"));
    assert!(text.contains("[ERROR] render failed\n"));
}
