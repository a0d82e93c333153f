//! Writer adapter that strips ANSI color sequences

use regex::bytes::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;

static SGR_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("SGR pattern is valid"));

/// Remove every `ESC [ <digits/semicolons> m` sequence from `bytes`.
pub fn strip_colors(bytes: &[u8]) -> std::borrow::Cow<'_, [u8]> {
    SGR_SEQUENCE.replace_all(bytes, &b""[..])
}

/// Forwards writes to `W` with color sequences removed.
///
/// Reports the caller's full buffer length as written so that
/// `write_all` does not retry the bytes that were stripped.
#[derive(Debug)]
pub struct ColorFilterWriter<W: Write> {
    inner: W,
}

impl<W: Write> ColorFilterWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ColorFilterWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write_all(&strip_colors(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
