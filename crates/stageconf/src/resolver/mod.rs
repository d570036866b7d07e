//! Layered configuration resolution
//!
//! Single entry point for resolving a service's configuration from its
//! defaults file, the environment, and the parameter store.

mod config_resolver;

pub use config_resolver::{ConfigResolver, Config, DynamoConfig, DEFAULT_FIELD_SEGMENT};
