//! AWS Systems Manager Parameter Store

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_ssm::error::{DisplayErrorContext, SdkError};
use aws_sdk_ssm::Client;

use super::traits::{Parameter, ParameterQuery, ParameterStore, ParamStoreError, ParamStoreResult};

/// Parameter store backed by AWS SSM `GetParametersByPath`
///
/// A client is built per query so the region can come from the layered
/// configuration itself (`AWSRegion`). Credentials come from the standard
/// AWS provider chain. All result pages are fetched.
///
/// # Example
///
/// ```no_run
/// use stageconf::params::{ParameterQuery, ParameterStore, SsmParameterStore};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SsmParameterStore::new();
/// let params = store
///     .get_parameters_by_path(&ParameterQuery::new("/prod/myapp", "us-east-1"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SsmParameterStore {
    sdk_config: Option<SdkConfig>,
}

impl SsmParameterStore {
    /// Create a store that loads AWS configuration from the environment
    pub fn new() -> Self {
        Self { sdk_config: None }
    }

    /// Create a store from an already loaded SDK configuration
    ///
    /// A non-empty query region still takes precedence over the config's region.
    pub fn from_sdk_config(sdk_config: SdkConfig) -> Self {
        Self {
            sdk_config: Some(sdk_config),
        }
    }

    async fn client(&self, region: &str) -> Client {
        let region = (!region.is_empty()).then(|| Region::new(region.to_string()));

        match &self.sdk_config {
            Some(sdk_config) => {
                let mut builder = aws_sdk_ssm::config::Builder::from(sdk_config);
                if let Some(region) = region {
                    builder = builder.region(region);
                }
                Client::from_conf(builder.build())
            }
            None => {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(region) = region {
                    loader = loader.region(region);
                }
                Client::new(&loader.load().await)
            }
        }
    }
}

fn map_sdk_error<E, R>(path: &str, err: SdkError<E, R>) -> ParamStoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) | SdkError::ConstructionFailure(_) => {
            ParamStoreError::Connection(message)
        }
        _ => ParamStoreError::query(path, message),
    }
}

fn convert(param: &aws_sdk_ssm::types::Parameter) -> Option<Parameter> {
    Some(Parameter::new(param.name()?, param.value()?))
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    fn name(&self) -> &str {
        "ssm"
    }

    async fn get_parameters_by_path(&self, query: &ParameterQuery) -> ParamStoreResult<Vec<Parameter>> {
        let client = self.client(&query.region).await;

        let mut pages = client
            .get_parameters_by_path()
            .path(&query.path)
            .with_decryption(query.with_decryption)
            .into_paginator()
            .send();

        let mut parameters = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| map_sdk_error(&query.path, e))?;
            parameters.extend(page.parameters().iter().filter_map(convert));
        }

        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssm_store_name() {
        assert_eq!(SsmParameterStore::new().name(), "ssm");
    }

    type TestSdkError = SdkError<std::io::Error, ()>;

    #[test]
    fn test_construction_and_timeout_failures_are_connection_errors() {
        let err: TestSdkError = SdkError::construction_failure("no credentials");
        assert!(matches!(map_sdk_error("/prod/myapp", err), ParamStoreError::Connection(_)));

        let err: TestSdkError = SdkError::timeout_error("request timed out");
        match map_sdk_error("/prod/myapp", err) {
            ParamStoreError::Connection(msg) => assert!(msg.contains("timed out")),
            other => panic!("expected Connection, got {other:?}"),
        }
    }

    #[test]
    fn test_service_errors_are_query_errors() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "AccessDeniedException");
        let err: TestSdkError = SdkError::service_error(source, ());
        match map_sdk_error("/prod/myapp", err) {
            ParamStoreError::Query { path, message } => {
                assert_eq!(path, "/prod/myapp");
                assert!(message.contains("AccessDeniedException"));
            }
            other => panic!("expected Query, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_requires_name_and_value() {
        let full = aws_sdk_ssm::types::Parameter::builder()
            .name("/prod/myapp/S3Bucket")
            .value("assets")
            .build();
        assert_eq!(convert(&full), Some(Parameter::new("/prod/myapp/S3Bucket", "assets")));

        let nameless = aws_sdk_ssm::types::Parameter::builder().value("assets").build();
        assert_eq!(convert(&nameless), None);
    }
}
