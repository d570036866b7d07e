//! Environment variable sources
//!
//! - `EnvSource` trait for looking up override values by field name
//! - `ProcessEnv`: the real process environment
//! - `MemoryEnv`: in-memory variables for tests and embedding hosts

mod traits;
mod process;
mod memory;

pub use traits::EnvSource;
pub use process::ProcessEnv;
pub use memory::MemoryEnv;
