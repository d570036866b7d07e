//! In-memory parameter store

use std::sync::RwLock;

use async_trait::async_trait;

use super::traits::{Parameter, ParameterQuery, ParameterStore, ParamStoreError, ParamStoreResult};

/// In-memory parameter store for testing
///
/// Mirrors `GetParametersByPath` without recursion: only parameters that are
/// direct children of the queried path are returned. Every query is recorded.
#[derive(Debug, Default)]
pub struct MemoryParameterStore {
    parameters: RwLock<Vec<Parameter>>,
    queries: RwLock<Vec<ParameterQuery>>,
    failure: Option<String>,
}

impl MemoryParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial parameters
    pub fn with_parameters(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters: RwLock::new(parameters),
            ..Self::default()
        }
    }

    /// Create a store whose queries always fail with a connection error
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Add or replace a parameter
    pub fn put(&self, name: impl Into<String>, value: impl Into<String>) {
        let param = Parameter::new(name, value);
        let mut guard = self.parameters.write().unwrap();
        match guard.iter().position(|p| p.name == param.name) {
            Some(pos) => guard[pos] = param,
            None => guard.push(param),
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<ParameterQuery> {
        self.queries.read().unwrap().clone()
    }

    fn is_child(path: &str, name: &str) -> bool {
        let prefix = path.trim_end_matches('/');
        name.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|leaf| !leaf.is_empty() && !leaf.contains('/'))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ParameterStore for MemoryParameterStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_parameters_by_path(&self, query: &ParameterQuery) -> ParamStoreResult<Vec<Parameter>> {
        self.queries.write().unwrap().push(query.clone());

        if let Some(message) = &self.failure {
            return Err(ParamStoreError::Connection(message.clone()));
        }

        let guard = self.parameters.read().unwrap();
        Ok(guard
            .iter()
            .filter(|p| Self::is_child(&query.path, &p.name))
            .cloned()
            .collect())
    }
}
