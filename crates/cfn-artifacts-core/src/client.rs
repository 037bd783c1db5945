//! Seams to the CloudFormation control plane and S3 object storage.
//!
//! Operations take these as trait objects so they can run against the AWS
//! SDK in production and in-memory fakes in tests.

use crate::error::Result;
use crate::locate::ArtifactRef;
use async_trait::async_trait;
use std::path::Path;

/// Which version of the template `GetTemplate` should return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateStage {
    /// The template as submitted, before transforms such as `AWS::Serverless`
    #[default]
    Original,
    /// The template after all transforms have been applied
    Processed,
}

#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch the template body for a stack. `Ok(None)` means the response
    /// carried no body.
    async fn get_template(&self, stack_name: &str, stage: TemplateStage)
        -> Result<Option<String>>;
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Download an object to `path`, replacing any existing file. Returns
    /// once the file is fully written.
    async fn download_to(&self, artifact: &ArtifactRef, path: &Path) -> Result<()>;
}
