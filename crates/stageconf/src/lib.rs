//! stageconf
//!
//! Layered service configuration. A [`ConfigResolver`] reads a bundled YAML
//! defaults file, applies environment variable overrides, then applies
//! parameters from AWS Systems Manager Parameter Store under
//! `/<stage>/<SsmPath>`, and publishes a validated [`Config`].
//!
//! ```rust,ignore
//! use stageconf::{ConfigResolver, StageEnvironment};
//!
//! let config = ConfigResolver::new().load().await?;
//! if config.stage() == StageEnvironment::Prod {
//!     // ...
//! }
//! ```

pub mod error;
pub mod stage;
pub mod defaults;
pub mod env;
pub mod params;
pub mod logging;
pub mod resolver;

pub use error::{ConfigError, ConfigResult};
pub use stage::StageEnvironment;
pub use defaults::{Defaults, DEFAULT_FILE_NAME, FIELD_NAMES};
pub use env::{EnvSource, ProcessEnv, MemoryEnv};
pub use params::{
    Parameter, ParameterQuery, ParameterStore, ParamStoreError, ParamStoreResult,
    SsmParameterStore, MemoryParameterStore,
};
pub use logging::{LogLevel, Logger, NoOpLogger, ConsoleLogger, SharedLogger};
pub use resolver::{ConfigResolver, Config, DynamoConfig};
