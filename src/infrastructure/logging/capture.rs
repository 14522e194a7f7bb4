//! In-memory sink writer for logging tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Shared buffer usable as a `MakeWriter` through [`Capture::writer`]
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    /// Captured output split into lines
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Writer factory handing out clones of this buffer
    pub fn writer(&self) -> impl Fn() -> Self + Send + Sync + 'static {
        let capture = self.clone();
        move || capture.clone()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
