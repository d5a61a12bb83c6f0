use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::warn;

use crate::proxy::ProxyConfig;
use crate::regions;

/// Host-supplied configuration for the credential catalog and fetcher.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Region bound to the catalog's default credential variant.
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Region ids offered by the catalog; defaults to the built-in table.
    #[serde(default)]
    pub regions: Option<Vec<String>>,

    /// Outbound proxy for the ECR API call.
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,

    /// Overall timeout for one token fetch, in seconds. SDK defaults apply
    /// when unset.
    #[serde(default)]
    pub operation_timeout_secs: Option<u64>,
}

fn default_region() -> String {
    regions::DEFAULT_REGION.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            regions: None,
            proxy: None,
            operation_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from the conventional sources: an optional config file
    /// named by `ECR_CREDENTIALS_CONFIG` (default `ecr-credentials`, any
    /// format the config crate supports) overlaid with
    /// `ECR_CREDENTIALS__*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_file =
            env::var("ECR_CREDENTIALS_CONFIG").unwrap_or_else(|_| "ecr-credentials".into());

        let settings: Settings = Config::builder()
            .add_source(File::with_name(&config_file).required(false))
            .add_source(Environment::with_prefix("ECR_CREDENTIALS").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an explicit config file plus environment
    /// overrides.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("ECR_CREDENTIALS").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_region.is_empty() {
            return Err(ConfigError::Message(
                "default_region must not be empty".to_string(),
            ));
        }

        // Unknown ids are allowed (new regions appear faster than any
        // table); they fail inside the AWS layer when actually used.
        for region in std::iter::once(&self.default_region).chain(self.regions.iter().flatten()) {
            if !regions::is_known(region) {
                warn!(%region, "region id is not in the built-in region table");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_region, "us-east-1");
        assert!(settings.regions.is_none());
        assert!(settings.proxy.is_none());
        assert!(settings.operation_timeout_secs.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ecr-credentials.toml");
        fs::write(
            &path,
            r#"
default_region = "eu-west-1"
regions = ["eu-west-1", "eu-central-1"]
operation_timeout_secs = 30

[proxy]
host = "proxy.example.com"
port = 3128
username = "user"
password = "pass"
no_proxy_hosts = ["169.254.169.254"]
"#,
        )
        .unwrap();

        let settings = Settings::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.default_region, "eu-west-1");
        assert_eq!(
            settings.regions,
            Some(vec!["eu-west-1".to_string(), "eu-central-1".to_string()])
        );
        assert_eq!(settings.operation_timeout_secs, Some(30));

        let proxy = settings.proxy.unwrap();
        assert_eq!(proxy.host, "proxy.example.com");
        assert_eq!(proxy.port, 3128);
        assert_eq!(proxy.no_proxy_hosts, vec!["169.254.169.254".to_string()]);
    }

    #[test]
    fn test_empty_default_region_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ecr-credentials.toml");
        fs::write(&path, "default_region = \"\"\n").unwrap();

        assert!(Settings::from_file(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unknown_region_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ecr-credentials.toml");
        fs::write(&path, "regions = [\"xx-new-1\"]\n").unwrap();

        // Warned about, not rejected: validation must not be stricter than
        // the AWS layer itself.
        let settings = Settings::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.regions, Some(vec!["xx-new-1".to_string()]));
    }
}
