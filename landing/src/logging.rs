//! `tracing` output routed to the browser console.
//!
//! The fmt subscriber formats each event into a [`ConsoleWriter`]; the writer
//! hands the finished line to the console method matching the event level
//! when it is dropped.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Install the global subscriber. Safe to call twice; the second call is a no-op.
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        // No wall clock in wasm32-unknown-unknown.
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .try_init();
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event.
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(128),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = render_line(&self.buf) else {
            return;
        };
        let line = JsValue::from_str(&line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Formatted event text without the trailing newline; `None` when empty.
fn render_line(buf: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buf);
    let text = text.trim_end();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_line_trims_newline() {
        assert_eq!(
            render_line(b" INFO reveal_core: attached\n").as_deref(),
            Some(" INFO reveal_core: attached")
        );
    }

    #[test]
    fn test_render_line_skips_blank_output() {
        assert_eq!(render_line(b""), None);
        assert_eq!(render_line(b"\n\n"), None);
    }

    #[test]
    fn test_render_line_tolerates_invalid_utf8() {
        let line = render_line(&[0x66, 0x6f, 0xff, 0x6f]).expect("non-empty");
        assert!(line.starts_with("fo"));
    }

    #[test]
    fn test_empty_writer_drop_is_silent() {
        let writer = ConsoleWriter::new(Level::ERROR);
        drop(writer);
    }
}
