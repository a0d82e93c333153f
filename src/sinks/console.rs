//! Console sink implementation

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Writes to the process's stdout or stderr, locking the stream per write
/// so records from concurrent loggers do not interleave.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Write for ConsoleSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().lock().write(buf),
            ConsoleTarget::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().lock().write_all(buf),
            ConsoleTarget::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().flush(),
            ConsoleTarget::Stderr => io::stderr().flush(),
        }
    }
}
