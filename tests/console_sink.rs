use chrono::{Local, TimeDelta, TimeZone};
use rotating_logger::logging::{ConsoleSink, ManualClock, Severity, Sink, format_line};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

// Writer whose contents stay readable after the sink takes ownership of it.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn writes_formatted_lines() {
    let start = Local.with_ymd_and_hms(2024, 3, 5, 14, 3, 7).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let buf = SharedBuf::default();
    let sink = ConsoleSink::with_writer(clock.clone(), Box::new(buf.clone()));

    sink.log(Severity::Warning, "console").unwrap();
    clock.advance(TimeDelta::milliseconds(250));
    sink.log(Severity::Finer, "later").unwrap();

    let expected = format!(
        "{}{}",
        format_line(&start, Severity::Warning, "console"),
        format_line(&(start + TimeDelta::milliseconds(250)), Severity::Finer, "later"),
    );
    assert_eq!(buf.text(), expected);
    assert!(buf.text().starts_with("2024-Mar-05 14:03:07.000000"));
    assert!(buf.text().contains(" [WARN]  console\n"));
}

#[test]
fn stdout_sink_accepts_lines() {
    assert!(ConsoleSink::new().log(Severity::Info, "to stdout").is_ok());
}
