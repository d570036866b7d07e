//! Remote parameter store abstractions
//!
//! - `ParameterStore` trait for hierarchical, path-addressed parameters
//! - `SsmParameterStore`: AWS Systems Manager Parameter Store
//! - `MemoryParameterStore`: in-memory for testing

mod traits;
mod memory;
mod ssm;

pub use traits::{Parameter, ParameterQuery, ParameterStore, ParamStoreError, ParamStoreResult};
pub use memory::MemoryParameterStore;
pub use ssm::SsmParameterStore;
