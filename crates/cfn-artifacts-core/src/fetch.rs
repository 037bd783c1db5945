use crate::client::{TemplateSource, TemplateStage};
use crate::error::{ArtifactError, Result};
use crate::template::Template;
use tracing::info;

/// Fetch and parse the deployed template for a stack.
///
/// Makes a single `GetTemplate` call. Transport errors are returned as-is;
/// a response without a body is `StackNotFound`.
pub async fn fetch_template(
    source: &dyn TemplateSource,
    stack_name: &str,
    stage: TemplateStage,
) -> Result<Template> {
    let body = source
        .get_template(stack_name, stage)
        .await?
        .ok_or_else(|| ArtifactError::StackNotFound {
            stack: stack_name.to_string(),
        })?;

    info!(
        stack = stack_name,
        ?stage,
        body_bytes = body.len(),
        "fetched stack template"
    );

    Template::parse(&body)
}
