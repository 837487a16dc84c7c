use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::dispatcher::{self, EventHandle};

/// Context passed to displayers for host interaction (output, telemetry).
pub struct HostContext {
    pub output: OutputSink,
    pub events: EventHandle,
}

impl HostContext {
    pub fn new(output: OutputSink) -> Self {
        Self {
            output,
            events: dispatcher::handle(),
        }
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new(OutputSink::stdout())
    }
}

/// Shared handle to the stream demo output is written to.
///
/// Everything a run prints goes through one sink, so separator lines and
/// displayer lines land in the order they were written even when the
/// sink is swapped for a capture buffer.
#[derive(Clone)]
pub struct OutputSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputSink {
    pub fn stdout() -> Self {
        Self::from_writer(Box::new(std::io::stdout()))
    }

    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// In-memory sink plus a handle for reading back what was written.
    pub fn memory() -> (Self, MemoryOutput) {
        let buffer: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Self::from_writer(Box::new(SharedBuffer(buffer.clone())));
        (sink, MemoryOutput(buffer))
    }

    /// Writes `line` followed by a newline.
    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut guard = self.inner.lock();
        guard.write_all(line.as_bytes())?;
        guard.write_all(b"\n")
    }

    pub fn blank_line(&self) -> std::io::Result<()> {
        self.inner.lock().write_all(b"\n")
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.inner.lock().flush()
    }
}

struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Read side of [`OutputSink::memory`].
#[derive(Clone)]
pub struct MemoryOutput(Arc<Mutex<Vec<u8>>>);

impl MemoryOutput {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().clone()
    }

    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}
