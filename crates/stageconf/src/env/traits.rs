//! Environment source trait

/// Source of environment-style overrides
///
/// Implementations:
/// - `ProcessEnv`: reads `std::env`
/// - `MemoryEnv`: in-memory map
///
/// # Example
///
/// ```
/// use stageconf::env::{EnvSource, MemoryEnv};
///
/// let env = MemoryEnv::new().with_var("Stage", "prod");
/// assert_eq!(env.get("Stage"), Some("prod".to_string()));
/// ```
pub trait EnvSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up a variable by its exact name
    ///
    /// Empty values are reported as unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Check if a variable is set
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
