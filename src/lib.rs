// cfn-artifacts - inspect CloudFormation stacks and download their Lambda artifacts
//
// Command implementations used by the binary:
// - template: print the deployed template with its original key order
// - download: fetch every Lambda code/layer package referenced by the stack

use anyhow::{Context, Result};
use cfn_artifacts_aws::AwsClients;
use cfn_artifacts_config::{RuntimeConfig, TemplateFormat};
use cfn_artifacts_core::{download_all, fetch_template, DownloadRequest, TemplateStage};
use std::io::Write;
use std::path::Path;
use tracing::info;

mod init;

pub use init::init_tracing;

/// Print the stack's template to stdout
pub async fn run_template(
    config: &RuntimeConfig,
    stack_name: &str,
    stage: TemplateStage,
    format: TemplateFormat,
) -> Result<()> {
    let clients = AwsClients::from_config(&config.aws).await;

    let template = fetch_template(&clients.templates, stack_name, stage)
        .await
        .with_context(|| format!("Failed to fetch template for stack '{}'", stack_name))?;
    let rendered = template
        .render(format)
        .with_context(|| format!("Failed to render template as {}", format))?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write template to stdout")?;

    Ok(())
}

/// Download every Lambda artifact of the stack into `download_to`
pub async fn run_download(
    config: &RuntimeConfig,
    stack_name: &str,
    download_to: &Path,
    stage: TemplateStage,
) -> Result<()> {
    let clients = AwsClients::from_config(&config.aws).await;

    let request = DownloadRequest {
        stack_name,
        target_dir: download_to,
        stage,
    };

    let mut stdout = std::io::stdout().lock();
    let reports = download_all(&clients.templates, &clients.artifacts, request, &mut stdout)
        .await
        .with_context(|| {
            format!(
                "Failed to download artifacts for stack '{}' to {}",
                stack_name,
                download_to.display()
            )
        })?;

    let total: u64 = reports.iter().map(|r| r.uncompressed_size).sum();
    info!(
        stack = stack_name,
        artifacts = reports.len(),
        uncompressed_bytes = total,
        "download finished"
    );

    Ok(())
}
