//! Routes `tracing` output to the browser console.
//!
//! A `tracing-subscriber` fmt layer formats each event into a buffer; the
//! buffer is handed to the matching `console.*` method when the writer is
//! dropped at the end of the event.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

use std::io;
use std::str::FromStr;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install the console subscriber and the panic hook. Later calls are
/// no-ops, so every controller on a page may call this.
pub fn init(level: &str) {
    console_error_panic_hook::set_once();

    let level = Level::from_str(level).unwrap_or(Level::INFO);
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(level)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(%err, "console subscriber already installed");
    }
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
        Self { level, buf: Vec::new() }
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
        if let Some(line) = take_line(&mut self.buf) {
            emit(self.level, &line);
        }
    }
}

/// Drain the buffer into one console line, without the trailing newline.
/// `None` when nothing printable was written.
fn take_line(buf: &mut Vec<u8>) -> Option<String> {
    let raw = std::mem::take(buf);
    let line = String::from_utf8_lossy(&raw);
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() { None } else { Some(line.to_string()) }
}

fn emit(level: Level, line: &str) {
    let msg = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&msg),
        Level::WARN => web_sys::console::warn_1(&msg),
        Level::INFO => web_sys::console::info_1(&msg),
        _ => web_sys::console::debug_1(&msg),
    }
}
