//! In-memory environment source

use std::collections::HashMap;

use super::traits::EnvSource;

/// In-memory environment source
///
/// Lets tests and embedding hosts supply overrides without mutating the
/// process environment.
///
/// # Example
///
/// ```
/// use stageconf::env::{EnvSource, MemoryEnv};
///
/// let env = MemoryEnv::new()
///     .with_var("Stage", "prod")
///     .with_var("S3Bucket", "assets");
/// assert!(env.has("S3Bucket"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with initial variables
    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Add a variable
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MemoryEnv {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_env_get() {
        let env = MemoryEnv::new().with_var("Stage", "prod");
        assert_eq!(env.name(), "memory");
        assert_eq!(env.get("Stage"), Some("prod".to_string()));
        assert_eq!(env.get("stage"), None);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_memory_env_empty_value_is_unset() {
        let env = MemoryEnv::new().with_var("S3Bucket", "");
        assert!(!env.has("S3Bucket"));
    }

    #[test]
    fn test_memory_env_with_vars() {
        let mut vars = HashMap::new();
        vars.insert("AWSRegion".to_string(), "eu-west-1".to_string());
        vars.insert("SsmPath".to_string(), "svc".to_string());

        let env = MemoryEnv::with_vars(vars);
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("AWSRegion"), Some("eu-west-1".to_string()));
        assert!(MemoryEnv::new().is_empty());
    }
}
