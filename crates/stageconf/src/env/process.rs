//! Process environment source

use std::env;

use super::traits::EnvSource;

/// Environment source backed by the process environment
///
/// Names are matched exactly (case-sensitive), so `S3Bucket` and
/// `S3BUCKET` are different variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn get(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}
