use std::io::Read;
use std::sync::{Arc, Mutex};

/// First read error seen by a [`ProgressReader`]. The HTTP client swallows
/// body errors, so the uploader fetches the real cause from here.
pub type ReadFailure = Arc<Mutex<Option<std::io::Error>>>;

/// Reader that reports how many bytes have been pulled through it.
pub struct ProgressReader<R: Read> {
    inner: R,
    sent: u64,
    total: u64,
    progress: Box<dyn FnMut(u64) + Send>,
    failure: ReadFailure,
}

impl<R: Read> ProgressReader<R> {
    pub fn new(inner: R, total: u64, progress: Box<dyn FnMut(u64) + Send>) -> Self {
        Self {
            inner,
            sent: 0,
            total,
            progress,
            failure: ReadFailure::default(),
        }
    }

    pub fn failure(&self) -> ReadFailure {
        self.failure.clone()
    }

    fn remember(&self, e: &std::io::Error) {
        if let Ok(mut slot) = self.failure.lock() {
            if slot.is_none() {
                *slot = Some(std::io::Error::new(e.kind(), e.to_string()));
            }
        }
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read_bytes = match self.inner.read(buf) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => return Err(e),
            Err(e) => {
                self.remember(&e);
                return Err(e);
            }
        };
        if read_bytes > 0 {
            self.sent = self.sent.saturating_add(read_bytes as u64).min(self.total);
            (self.progress)(self.sent);
        }
        Ok(read_bytes)
    }
}
