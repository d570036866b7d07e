//! Working defaults record
//!
//! `Defaults` is the staging area the resolver layers sources onto:
//! the YAML defaults file first, then environment variables, then remote
//! parameters. Environment and remote overrides address fields by their
//! field name (e.g. `DynamoRegion`), which is not always the YAML key
//! (`Region`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::stage::StageEnvironment;

/// Default defaults file name, resolved against the working directory
pub const DEFAULT_FILE_NAME: &str = "defaults.yaml";

/// Field name of the stage, revalidated whenever it is overridden
pub const STAGE_FIELD: &str = "Stage";

/// Mutable, string-typed configuration record before finalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(rename = "AWSRegion", deserialize_with = "null_as_empty")]
    pub aws_region: String,
    #[serde(rename = "S3Bucket", deserialize_with = "null_as_empty")]
    pub s3_bucket: String,
    #[serde(rename = "S3FilePrefix", deserialize_with = "null_as_empty")]
    pub s3_file_prefix: String,
    #[serde(rename = "CognitoClientID", deserialize_with = "null_as_empty")]
    pub cognito_client_id: String,
    #[serde(rename = "CognitoPoolID", deserialize_with = "null_as_empty")]
    pub cognito_pool_id: String,
    #[serde(rename = "CognitoRegion", deserialize_with = "null_as_empty")]
    pub cognito_region: String,
    #[serde(rename = "APIVersion", deserialize_with = "null_as_empty")]
    pub dynamo_api_version: String,
    #[serde(rename = "Region", deserialize_with = "null_as_empty")]
    pub dynamo_region: String,
    #[serde(rename = "GraphqlURI", deserialize_with = "null_as_empty")]
    pub graphql_uri: String,
    #[serde(rename = "SsmPath", deserialize_with = "null_as_empty")]
    pub ssm_path: String,
    #[serde(rename = "Stage", deserialize_with = "null_as_empty")]
    pub stage: String,
}

/// YAML nulls (`~`, `null`, bare key) leave a field empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! field_table {
    ($($name:literal => $field:ident),* $(,)?) => {
        /// Overridable field names, in override order
        pub const FIELD_NAMES: &[&str] = &[$($name),*];

        impl Defaults {
            /// Look up a field by its field name
            pub fn field(&self, name: &str) -> Option<&str> {
                match name {
                    $($name => Some(self.$field.as_str()),)*
                    _ => None,
                }
            }

            /// Mutable access to a field by its field name
            pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
                match name {
                    $($name => Some(&mut self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

field_table! {
    "AWSRegion" => aws_region,
    "S3Bucket" => s3_bucket,
    "S3FilePrefix" => s3_file_prefix,
    "CognitoClientID" => cognito_client_id,
    "CognitoPoolID" => cognito_pool_id,
    "CognitoRegion" => cognito_region,
    "DynamoAPIVersion" => dynamo_api_version,
    "DynamoRegion" => dynamo_region,
    "GraphqlURI" => graphql_uri,
    "SsmPath" => ssm_path,
    "Stage" => stage,
}

impl Defaults {
    /// Parse a YAML document
    ///
    /// Unknown keys are ignored; missing or null keys stay empty. An empty
    /// or null document yields an empty record.
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let defaults: Option<Self> = serde_yaml::from_str(content)?;
        Ok(defaults.unwrap_or_default())
    }

    /// Read and parse a YAML defaults file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::file_read(path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Overwrite a field by name
    ///
    /// Returns `false` (and changes nothing) if no field has that name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Validate the current stage string
    pub fn validate_stage(&self) -> ConfigResult<StageEnvironment> {
        self.stage.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
AWSRegion: us-east-1
S3Bucket: assets
S3FilePrefix: uploads/
CognitoClientID: client-123
CognitoPoolID: us-east-1_pool
CognitoRegion: us-east-1
APIVersion: "2012-08-10"
Region: us-west-2
GraphqlURI: https://api.example.com/graphql
SsmPath: myapp
Stage: dev
"#;

    #[test]
    fn test_parse_yaml_keys() {
        let defaults = Defaults::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(defaults.aws_region, "us-east-1");
        assert_eq!(defaults.s3_bucket, "assets");
        assert_eq!(defaults.s3_file_prefix, "uploads/");
        assert_eq!(defaults.cognito_client_id, "client-123");
        assert_eq!(defaults.cognito_pool_id, "us-east-1_pool");
        assert_eq!(defaults.cognito_region, "us-east-1");
        assert_eq!(defaults.dynamo_api_version, "2012-08-10");
        assert_eq!(defaults.dynamo_region, "us-west-2");
        assert_eq!(defaults.graphql_uri, "https://api.example.com/graphql");
        assert_eq!(defaults.ssm_path, "myapp");
        assert_eq!(defaults.stage, "dev");
    }

    #[test]
    fn test_missing_and_unknown_keys() {
        let defaults = Defaults::from_yaml_str("Stage: prod\nSomethingElse: 42\n").unwrap();
        assert_eq!(defaults.stage, "prod");
        assert!(defaults.s3_bucket.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let defaults = Defaults::from_yaml_str("  \n").unwrap();
        assert_eq!(defaults, Defaults::default());
        assert!(matches!(defaults.validate_stage(), Err(ConfigError::InvalidStage(_))));
    }

    #[test]
    fn test_null_values_are_empty() {
        let defaults = Defaults::from_yaml_str(
            "Stage: dev\nRegion: ~\nS3Bucket:\nCognitoClientID: null\nGraphqlURI: \"null\"\n",
        )
        .unwrap();
        assert_eq!(defaults.dynamo_region, "");
        assert_eq!(defaults.s3_bucket, "");
        assert_eq!(defaults.cognito_client_id, "");
        // Quoted text is a string, not a null
        assert_eq!(defaults.graphql_uri, "null");
        assert_eq!(defaults.stage, "dev");
    }

    #[test]
    fn test_null_and_comment_documents() {
        for doc in ["~", "null\n", "# only a comment\n", "---\n"] {
            let defaults = Defaults::from_yaml_str(doc).unwrap();
            assert_eq!(defaults, Defaults::default(), "document {doc:?}");
            assert!(matches!(defaults.validate_stage(), Err(ConfigError::InvalidStage(_))));
        }
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Defaults::from_yaml_str("Stage: [dev"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Defaults::from_yaml_str("Stage:\n  nested: map\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_field_names_differ_from_yaml_keys() {
        let defaults = Defaults::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(defaults.field("DynamoAPIVersion"), Some("2012-08-10"));
        assert_eq!(defaults.field("DynamoRegion"), Some("us-west-2"));
        // YAML keys are not field names
        assert_eq!(defaults.field("APIVersion"), None);
        assert_eq!(defaults.field("Region"), None);
    }

    #[test]
    fn test_every_field_name_resolves() {
        let mut defaults = Defaults::default();
        for name in FIELD_NAMES {
            assert!(defaults.set(name, format!("v-{name}")), "{name} not settable");
        }
        for name in FIELD_NAMES {
            assert_eq!(defaults.field(name), Some(format!("v-{name}").as_str()));
        }
        assert!(FIELD_NAMES.contains(&STAGE_FIELD));
    }

    #[test]
    fn test_set_unknown_field() {
        let mut defaults = Defaults::default();
        assert!(!defaults.set("UnknownField", "x"));
        assert_eq!(defaults, Defaults::default());
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        fs::write(&path, SAMPLE).unwrap();

        let defaults = Defaults::from_file(&path).unwrap();
        assert_eq!(defaults.validate_stage().unwrap(), StageEnvironment::Dev);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        match Defaults::from_file(&path) {
            Err(ConfigError::FileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }
}
