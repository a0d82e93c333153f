//! Ready-made destinations
//!
//! Any `std::io::Write + Send` value can be registered with a logger; these
//! cover the common cases.

pub mod console;
pub mod file;
pub mod memory;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::FileSink;
pub use memory::MemorySink;
