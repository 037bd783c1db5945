//! CloudFormation template inspection and Lambda artifact download
//!
//! Reads a stack's deployed template, finds `AWS::Lambda::Function` and
//! `AWS::Lambda::LayerVersion` resources whose packages live in S3, and
//! downloads them. AWS access goes through the [`TemplateSource`] and
//! [`ArtifactStore`] traits; see `cfn-artifacts-aws` for the SDK-backed
//! implementations.

mod archive;
mod client;
mod download;
mod error;
mod fetch;
mod locate;
mod template;

pub use archive::{format_size, uncompressed_size};
pub use client::{ArtifactStore, TemplateSource, TemplateStage};
pub use download::{download_all, DownloadReport, DownloadRequest};
pub use error::{ArtifactError, BoxError, Result};
pub use fetch::fetch_template;
pub use locate::{locate, ArtifactRef, ResourceType};
pub use template::{render, Resource, Template};

// Re-export so callers can name the output format without a direct dependency
pub use cfn_artifacts_config::TemplateFormat;
