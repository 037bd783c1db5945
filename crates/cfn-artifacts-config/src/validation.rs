// Configuration validation
//
// Rejects values the AWS SDK would otherwise fail on much later

use crate::*;
use anyhow::{bail, Result};
use tracing::warn;

pub fn validate_config(config: &RuntimeConfig) -> Result<()> {
    validate_aws_config(&config.aws)?;
    validate_log_config(&config.log)?;
    Ok(())
}

fn validate_aws_config(config: &AwsConfig) -> Result<()> {
    if matches!(config.region.as_deref(), Some(r) if r.trim().is_empty()) {
        bail!("aws.region must not be empty when set");
    }

    if matches!(config.profile.as_deref(), Some(p) if p.trim().is_empty()) {
        bail!("aws.profile must not be empty when set");
    }

    if let Some(endpoint) = &config.endpoint_url {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            bail!(
                "aws.endpoint_url must start with http:// or https://, got '{}'",
                endpoint
            );
        }

        if endpoint.starts_with("http://") {
            warn!(
                endpoint = %endpoint,
                "aws.endpoint_url uses plain HTTP; credentials will be sent unencrypted"
            );
        }
    }

    Ok(())
}

fn validate_log_config(config: &LogConfig) -> Result<()> {
    if config.level.trim().is_empty() {
        bail!("log.level must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_endpoint() {
        let mut config = RuntimeConfig::default();
        config.aws.endpoint_url = Some("http://localhost:4566".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_endpoint_without_scheme() {
        let mut config = RuntimeConfig::default();
        config.aws.endpoint_url = Some("localhost:4566".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("aws.endpoint_url"));
    }

    #[test]
    fn test_empty_region() {
        let mut config = RuntimeConfig::default();
        config.aws.region = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_profile() {
        let mut config = RuntimeConfig::default();
        config.aws.profile = Some(String::new());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_log_level() {
        let mut config = RuntimeConfig::default();
        config.log.level = String::new();
        assert!(validate_config(&config).is_err());
    }
}
