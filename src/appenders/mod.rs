//! Appender implementations

pub mod console;
pub mod memory;
pub mod stream;

pub use console::{ConsoleAppender, ConsoleTarget};
pub use memory::MemoryAppender;
pub use stream::StreamAppender;

// Re-export the trait alongside its implementations
pub use crate::core::Appender;
