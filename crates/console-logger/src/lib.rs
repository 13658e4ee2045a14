//! Console Logger
//!
//! A `tracing` subscriber for the browser. Every formatted line goes to the
//! devtools console at its own level and into a circular buffer, so the app
//! can show the most recent lines without keeping the whole history.
//! Native builds (tests, tooling) write to stderr instead.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Lines kept in memory
pub const BUFFER_CAPACITY: usize = 500;

static BUFFER: OnceLock<LogBuffer> = OnceLock::new();

/// Circular buffer of formatted log lines
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append a line, evicting the oldest once full
    pub fn push(&self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            while lines.len() >= self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

/// Collects one event's output and flushes it as a single line on drop
pub struct ConsoleWriter {
    buffer: LogBuffer,
    level: Level,
    pending: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.pending).trim_end().to_string();
        if line.is_empty() {
            return;
        }
        emit(self.level, &line);
        self.buffer.push(line);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&value),
        Level::WARN => console::warn_1(&value),
        Level::INFO => console::info_1(&value),
        _ => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Hands out a `ConsoleWriter` per event, tagged with the event's level
#[derive(Debug, Clone)]
pub struct ConsoleMakeWriter {
    buffer: LogBuffer,
}

impl ConsoleMakeWriter {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            buffer: self.buffer.clone(),
            level: Level::INFO,
            pending: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            buffer: self.buffer.clone(),
            level: *meta.level(),
            pending: Vec::new(),
        }
    }
}

/// Local wall-clock time with milliseconds
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTimer;

impl FormatTime for ChronoTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Install the global subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_logger(app_name: &str, level: Level) -> Result<(), TryInitError> {
    let buffer = shared_buffer().clone();
    tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter::new(buffer))
        .with_timer(ChronoTimer)
        .with_ansi(false)
        .with_max_level(level)
        .with_target(false)
        .finish()
        .try_init()?;

    tracing::info!(app = app_name, %level, "logger initialized");
    Ok(())
}

fn shared_buffer() -> &'static LogBuffer {
    BUFFER.get_or_init(|| LogBuffer::new(BUFFER_CAPACITY))
}

/// Most recent lines of the global logger, oldest first
pub fn recent_lines() -> Vec<String> {
    shared_buffer().lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {i}"));
        }
        assert_eq!(buffer.lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let buffer = LogBuffer::new(0);
        buffer.push("dropped".into());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_writer_flushes_one_line_on_drop() {
        let buffer = LogBuffer::new(10);
        let make = ConsoleMakeWriter::new(buffer.clone());
        {
            let mut writer = make.make_writer();
            write!(writer, "12:00:00.000  INFO ").unwrap();
            writeln!(writer, "progress refreshed").unwrap();
        }
        {
            let _empty = make.make_writer();
        }
        assert_eq!(buffer.lines(), vec!["12:00:00.000  INFO progress refreshed"]);
    }

    #[test]
    fn test_global_logger_fills_shared_buffer() {
        init_logger("test", Level::DEBUG).unwrap();
        tracing::warn!("quota poll failed");
        assert!(recent_lines().iter().any(|l| l.contains("quota poll failed") && l.contains("WARN")));
        assert!(init_logger("again", Level::INFO).is_err());
    }
}
