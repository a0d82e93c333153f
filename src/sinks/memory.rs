//! In-memory sink

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A cloneable byte buffer. Clones share storage, so keep one clone and
/// register another to read back what the logger wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.write_all(b"abc").unwrap();

        assert_eq!(sink.contents(), b"abc");
        assert_eq!(sink.len(), 3);

        sink.clear();
        assert!(writer.is_empty());
    }
}
