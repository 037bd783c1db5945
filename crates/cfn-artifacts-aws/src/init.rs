// Client construction from RuntimeConfig
//
// One SdkConfig is loaded per process and shared by both service clients.

use crate::{CloudFormationTemplates, S3ArtifactStore};
use aws_config::{BehaviorVersion, Region};
use cfn_artifacts_config::AwsConfig;
use tracing::{debug, info};

/// CloudFormation and S3 clients built from one shared SDK configuration
#[derive(Clone, Debug)]
pub struct AwsClients {
    pub templates: CloudFormationTemplates,
    pub artifacts: S3ArtifactStore,
}

impl AwsClients {
    /// Load the ambient AWS configuration and apply any explicit overrides.
    ///
    /// Credentials always come from the SDK's default provider chain.
    pub async fn from_config(config: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &config.endpoint_url {
            info!("Using custom AWS endpoint: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "loaded AWS SDK configuration");

        let cfn_client = aws_sdk_cloudformation::Client::new(&sdk_config);

        // S3-compatible endpoints (MinIO, LocalStack) need path-style addressing
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint_url.is_some())
            .build();
        let s3_client = aws_sdk_s3::Client::from_conf(s3_config);

        Self {
            templates: CloudFormationTemplates::new(cfn_client),
            artifacts: S3ArtifactStore::new(s3_client),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_region_reaches_both_clients() {
        let config = AwsConfig {
            region: Some("eu-north-1".to_string()),
            profile: None,
            endpoint_url: Some("http://localhost:4566".to_string()),
        };

        let clients = AwsClients::from_config(&config).await;

        assert_eq!(
            clients
                .templates
                .client()
                .config()
                .region()
                .map(|r| r.as_ref()),
            Some("eu-north-1")
        );
        assert_eq!(
            clients
                .artifacts
                .client()
                .config()
                .region()
                .map(|r| r.as_ref()),
            Some("eu-north-1")
        );
    }
}
