//! Layered configuration resolution
//!
//! Source priority (later sources override earlier):
//! 1. YAML defaults file (`./defaults.yaml` unless configured)
//! 2. Environment variables named exactly like the defaults fields
//! 3. Parameter store entries under `/<stage>/<SsmPath>`
//!
//! The working `Defaults` record is passed by value through each step.
//! The stage is validated after the file load, when the environment pass
//! reaches `Stage`, and again on finalization.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::defaults::{Defaults, DEFAULT_FILE_NAME, FIELD_NAMES, STAGE_FIELD};
use crate::env::{EnvSource, ProcessEnv};
use crate::error::{ConfigError, ConfigResult};
use crate::logging::{Logger, NoOpLogger, SharedLogger};
use crate::params::{ParameterQuery, ParameterStore, SsmParameterStore};
use crate::stage::StageEnvironment;
use crate::{log_debug, log_info, log_warn};

/// Path segment holding the field name in `/<stage>/<SsmPath>/<Field>`
pub const DEFAULT_FIELD_SEGMENT: usize = 3;

/// DynamoDB connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamoConfig {
    pub api_version: String,
    pub region: String,
}

/// Resolved, validated configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub aws_region: String,
    pub s3_bucket: String,
    pub s3_file_prefix: String,
    pub cognito_client_id: String,
    pub cognito_pool_id: String,
    pub cognito_region: String,
    pub dynamo: DynamoConfig,
    pub graphql_uri: String,
    pub stage: StageEnvironment,
}

impl Config {
    /// Deployment stage
    pub fn stage(&self) -> StageEnvironment {
        self.stage
    }
}

/// Resolves a [`Config`] from defaults file, environment, and parameter store
///
/// # Example
///
/// ```no_run
/// use stageconf::ConfigResolver;
///
/// let config = ConfigResolver::new()
///     .with_defaults_path("/etc/myapp/defaults.yaml")
///     .load_blocking()?;
/// println!("running in {}", config.stage());
/// # Ok::<(), stageconf::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    defaults_path: Option<PathBuf>,
    env: Arc<dyn EnvSource>,
    params: Arc<dyn ParameterStore>,
    logger: SharedLogger,
    field_segment: usize,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Create a resolver using the process environment and AWS SSM
    pub fn new() -> Self {
        Self {
            defaults_path: None,
            env: Arc::new(ProcessEnv::new()),
            params: Arc::new(SsmParameterStore::new()),
            logger: Arc::new(NoOpLogger::new()),
            field_segment: DEFAULT_FIELD_SEGMENT,
        }
    }

    /// Read defaults from this file instead of `./defaults.yaml`
    pub fn with_defaults_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults_path = Some(path.into());
        self
    }

    /// Use a different environment source
    pub fn with_env_source(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    /// Use a different parameter store
    pub fn with_parameter_store(mut self, params: Arc<dyn ParameterStore>) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Zero-based `/`-separated segment of a parameter name used as the field name
    pub fn with_field_segment(mut self, index: usize) -> Self {
        self.field_segment = index;
        self
    }

    /// Defaults file path, resolved against the working directory if unset
    pub fn defaults_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.defaults_path {
            return Ok(path.clone());
        }
        env::current_dir()
            .map(|dir| dir.join(DEFAULT_FILE_NAME))
            .map_err(|e| ConfigError::file_read(DEFAULT_FILE_NAME, e))
    }

    /// Run the full pipeline
    ///
    /// The first failing step aborts resolution.
    pub async fn load(&self) -> ConfigResult<Config> {
        let defaults = self.load_defaults()?;
        let defaults = self.apply_env(defaults)?;
        let defaults = self.apply_parameters(defaults).await?;
        let dynamo = Self::build_dynamo(&defaults);
        let config = self.finalize(defaults, dynamo)?;

        log_info!(self.logger, "Configuration loaded for stage {}", config.stage);
        Ok(config)
    }

    /// Run the full pipeline on a private current-thread runtime
    ///
    /// Fails with [`ConfigError::NestedRuntime`] when called from within an
    /// async runtime.
    pub fn load_blocking(&self) -> ConfigResult<Config> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ConfigError::NestedRuntime);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ConfigError::Runtime)?;
        runtime.block_on(self.load())
    }

    /// Step 1: read the defaults file and validate its stage
    pub fn load_defaults(&self) -> ConfigResult<Defaults> {
        let path = self.defaults_path()?;
        log_debug!(self.logger, "Loading defaults from {}", path.display());

        let defaults = Defaults::from_file(&path)?;
        defaults.validate_stage()?;
        Ok(defaults)
    }

    /// Step 2: override fields from identically named environment variables
    pub fn apply_env(&self, mut defaults: Defaults) -> ConfigResult<Defaults> {
        for &name in FIELD_NAMES {
            if let Some(value) = self.env.get(name) {
                log_debug!(self.logger, "Overriding {} from {} environment", name, self.env.name());
                defaults.set(name, value);
            }
            if name == STAGE_FIELD {
                defaults.validate_stage()?;
            }
        }
        Ok(defaults)
    }

    /// Step 3: override fields from the parameter store
    ///
    /// Zero returned parameters is not an error. Parameters whose name does
    /// not resolve to a known field are ignored.
    pub async fn apply_parameters(&self, mut defaults: Defaults) -> ConfigResult<Defaults> {
        let stage = defaults.validate_stage()?;
        let query = ParameterQuery::new(
            ParameterQuery::stage_path(stage.as_str(), &defaults.ssm_path),
            defaults.aws_region.clone(),
        );
        log_debug!(self.logger, "Fetching parameters from {} under {}", self.params.name(), query.path);

        let parameters = self.params.get_parameters_by_path(&query).await?;
        if parameters.is_empty() {
            log_debug!(self.logger, "No parameters found under {}", query.path);
            return Ok(defaults);
        }

        let mut applied = 0;
        for param in &parameters {
            let Some(field) = param.segment(self.field_segment) else {
                log_warn!(
                    self.logger,
                    "Skipping parameter {}: no path segment {}",
                    param.name,
                    self.field_segment
                );
                continue;
            };
            if defaults.set(field, &param.value) {
                applied += 1;
            } else {
                log_debug!(self.logger, "Ignoring parameter {}: no field named {:?}", param.name, field);
            }
        }

        log_debug!(self.logger, "Applied {} of {} parameters", applied, parameters.len());
        Ok(defaults)
    }

    /// Step 4: DynamoDB sub-configuration
    pub fn build_dynamo(defaults: &Defaults) -> DynamoConfig {
        DynamoConfig {
            api_version: defaults.dynamo_api_version.clone(),
            region: defaults.dynamo_region.clone(),
        }
    }

    /// Step 5: publish the final configuration and revalidate the stage
    pub fn finalize(&self, defaults: Defaults, dynamo: DynamoConfig) -> ConfigResult<Config> {
        let stage = defaults.validate_stage()?;
        Ok(Config {
            aws_region: defaults.aws_region,
            s3_bucket: defaults.s3_bucket,
            s3_file_prefix: defaults.s3_file_prefix,
            cognito_client_id: defaults.cognito_client_id,
            cognito_pool_id: defaults.cognito_pool_id,
            cognito_region: defaults.cognito_region,
            dynamo,
            graphql_uri: defaults.graphql_uri,
            stage,
        })
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("defaults_path", &self.defaults_path)
            .field("env", &self.env.name())
            .field("params", &self.params.name())
            .field("field_segment", &self.field_segment)
            .finish()
    }
}
