// Artifact download workflow
//
// One linear pass over the template's resources: locate, download, size.
// Any error aborts the run; nothing is retried.

use crate::archive::{format_size, uncompressed_size};
use crate::client::{ArtifactStore, TemplateSource, TemplateStage};
use crate::error::{ArtifactError, Result};
use crate::fetch::fetch_template;
use crate::locate::{locate, ArtifactRef};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parameters for [`download_all`]
#[derive(Debug, Clone)]
pub struct DownloadRequest<'a> {
    pub stack_name: &'a str,
    /// Directory receiving `<ResourceName>.zip` files; created if missing
    pub target_dir: &'a Path,
    pub stage: TemplateStage,
}

/// Outcome for one downloaded artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub resource: String,
    pub artifact: ArtifactRef,
    pub path: PathBuf,
    pub uncompressed_size: u64,
}

/// Download every S3 artifact referenced by the stack's resources.
///
/// Writes a `Download: <name>` line before each download and a
/// `  Total: <size> bytes` line after it to `out`.
pub async fn download_all<W: Write>(
    templates: &dyn TemplateSource,
    store: &dyn ArtifactStore,
    request: DownloadRequest<'_>,
    out: &mut W,
) -> Result<Vec<DownloadReport>> {
    let template = fetch_template(templates, request.stack_name, request.stage).await?;

    std::fs::create_dir_all(request.target_dir)
        .map_err(|e| ArtifactError::io(request.target_dir, e))?;

    let mut reports = Vec::new();
    for resource in template.resources()? {
        let Some(artifact) = locate(&resource)? else {
            continue;
        };

        writeln!(out, "Download: {}", resource.name).map_err(ArtifactError::Output)?;

        let path = request.target_dir.join(format!("{}.zip", resource.name));
        debug!(resource = resource.name, %artifact, path = %path.display(), "downloading artifact");
        store.download_to(&artifact, &path).await?;

        let total = uncompressed_size(&path)?;
        writeln!(out, "  Total: {} bytes", format_size(total)).map_err(ArtifactError::Output)?;

        info!(
            resource = resource.name,
            %artifact,
            uncompressed_bytes = total,
            "downloaded artifact"
        );

        reports.push(DownloadReport {
            resource: resource.name.to_string(),
            artifact,
            path,
            uncompressed_size: total,
        });
    }

    Ok(reports)
}
