//! Deployment stage

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Deployment environment a service runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StageEnvironment {
    Dev,
    Stage,
    Test,
    Prod,
}

impl StageEnvironment {
    /// All stages, in promotion order
    pub const ALL: [StageEnvironment; 4] = [
        StageEnvironment::Dev,
        StageEnvironment::Stage,
        StageEnvironment::Test,
        StageEnvironment::Prod,
    ];

    /// Canonical name, also used as the first parameter store path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            StageEnvironment::Dev => "dev",
            StageEnvironment::Stage => "stage",
            StageEnvironment::Test => "test",
            StageEnvironment::Prod => "prod",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, StageEnvironment::Prod)
    }
}

impl FromStr for StageEnvironment {
    type Err = ConfigError;

    /// Exact, case-sensitive match; `production` is an alias for `prod`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(StageEnvironment::Dev),
            "stage" => Ok(StageEnvironment::Stage),
            "test" => Ok(StageEnvironment::Test),
            "prod" | "production" => Ok(StageEnvironment::Prod),
            other => Err(ConfigError::invalid_stage(other)),
        }
    }
}

impl TryFrom<String> for StageEnvironment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for StageEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
