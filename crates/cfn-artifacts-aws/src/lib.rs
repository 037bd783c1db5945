//! AWS SDK implementations of the cfn-artifacts client traits
//!
//! - [`CloudFormationTemplates`]: `GetTemplate` against the CloudFormation API
//! - [`S3ArtifactStore`]: streamed `GetObject` into a local file

mod cloudformation;
mod init;
mod s3;

pub use cloudformation::CloudFormationTemplates;
pub use init::AwsClients;
pub use s3::S3ArtifactStore;
