//! Parameter store trait and types

use async_trait::async_trait;
use thiserror::Error;

/// A parameter returned by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Full hierarchical name, e.g. `/prod/myapp/S3Bucket`
    pub name: String,
    /// Value, decrypted if the query asked for it
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Path segment at `index` after splitting the name on `/`
    ///
    /// A leading `/` yields an empty segment 0, so for `/prod/myapp/S3Bucket`
    /// segment 3 is `S3Bucket`.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.name.split('/').nth(index)
    }
}

/// A "get parameters by path" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterQuery {
    /// Hierarchy path, e.g. `/prod/myapp`
    pub path: String,
    /// Region to query; empty means the client's default region
    pub region: String,
    /// Ask the store to decrypt secure values
    pub with_decryption: bool,
}

impl ParameterQuery {
    /// Create a query that decrypts values
    pub fn new(path: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            region: region.into(),
            with_decryption: true,
        }
    }

    /// Build the path `/<stage>/<subpath>`
    pub fn stage_path(stage: &str, subpath: &str) -> String {
        ["", stage, subpath].join("/")
    }
}

/// Errors that can occur talking to a parameter store
#[derive(Error, Debug)]
pub enum ParamStoreError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("query for {path} failed: {message}")]
    Query { path: String, message: String },
}

impl ParamStoreError {
    pub fn query(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type ParamStoreResult<T> = Result<T, ParamStoreError>;

/// Hierarchical parameter store
///
/// Implementations:
/// - `SsmParameterStore`: AWS SSM `GetParametersByPath`
/// - `MemoryParameterStore`: in-memory for testing
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Fetch every parameter directly under `query.path`
    ///
    /// An empty result is not an error.
    async fn get_parameters_by_path(&self, query: &ParameterQuery) -> ParamStoreResult<Vec<Parameter>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment() {
        let param = Parameter::new("/prod/myapp/S3Bucket", "assets");
        assert_eq!(param.segment(0), Some(""));
        assert_eq!(param.segment(1), Some("prod"));
        assert_eq!(param.segment(3), Some("S3Bucket"));
        assert_eq!(param.segment(4), None);
    }

    #[test]
    fn test_segment_short_name() {
        let param = Parameter::new("S3Bucket", "assets");
        assert_eq!(param.segment(3), None);
    }

    #[test]
    fn test_stage_path() {
        assert_eq!(ParameterQuery::stage_path("prod", "myapp"), "/prod/myapp");
        assert_eq!(ParameterQuery::stage_path("dev", ""), "/dev/");
    }

    #[test]
    fn test_query_decrypts_by_default() {
        let query = ParameterQuery::new("/prod/myapp", "us-east-1");
        assert!(query.with_decryption);
    }
}
