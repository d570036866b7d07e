//! Logging abstractions
//!
//! The resolver reports progress through a `Logger` supplied by the host.
//! The default is `NoOpLogger`, so failures surface only as returned errors.

mod traits;
mod noop;
mod console;

pub use traits::{LogLevel, Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
