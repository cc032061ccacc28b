//! Console logging.
//!
//! `tracing` events from every crate are formatted by `tracing-subscriber`
//! and written to the browser console at the matching console level.

use anyhow::{Context, Result};
use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}"))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("logging already initialised")
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it on drop.
struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => gloo::console::error!(line),
            Level::WARN => gloo::console::warn!(line),
            Level::INFO => gloo::console::info!(line),
            _ => gloo::console::debug!(line),
        }
    }
}

/// Component-tagged messages for UI code.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        tracing::debug!(component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        tracing::info!(component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        tracing::warn!(component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        tracing::error!(component, "{}", message);
    }
}
