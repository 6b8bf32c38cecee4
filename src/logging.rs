//! `tracing` setup. While the TUI owns the terminal, log lines are held in
//! a buffer and flushed to stderr once the terminal is restored.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `watchlist=trace`
pub const LOG_ENV: &str = "WATCHLIST_LOG";

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding log lines instead of printing them.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Stop buffering and return all collected lines.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

fn emit(line: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(line);
    } else {
        drop(guard);
        eprint!("{}", line);
    }
}

/// `MakeWriter` that routes each formatted event through the buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferedStderr;

/// Collects one event and emits it on drop.
pub struct EventWriter {
    bytes: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if !self.bytes.is_empty() {
            emit(String::from_utf8_lossy(&self.bytes).into_owned());
        }
    }
}

impl<'a> MakeWriter<'a> for BufferedStderr {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter { bytes: Vec::new() }
    }
}

/// Install the global subscriber. `verbose` raises the default level from warn to debug;
/// `WATCHLIST_LOG` overrides both.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "watchlist=debug"
    } else {
        "watchlist=warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(BufferedStderr)
        .with_target(false)
        .try_init();
}
