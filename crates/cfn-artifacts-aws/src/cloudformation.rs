use async_trait::async_trait;
use aws_sdk_cloudformation::types::TemplateStage as SdkTemplateStage;
use aws_sdk_cloudformation::Client;
use cfn_artifacts_core::{ArtifactError, Result, TemplateSource, TemplateStage};
use tracing::debug;

/// Reads deployed templates through the CloudFormation `GetTemplate` API
#[derive(Clone, Debug)]
pub struct CloudFormationTemplates {
    client: Client,
}

impl CloudFormationTemplates {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl TemplateSource for CloudFormationTemplates {
    async fn get_template(
        &self,
        stack_name: &str,
        stage: TemplateStage,
    ) -> Result<Option<String>> {
        debug!(stack = stack_name, ?stage, "calling GetTemplate");

        let output = self
            .client
            .get_template()
            .stack_name(stack_name)
            .template_stage(sdk_stage(stage))
            .send()
            .await
            .map_err(|e| ArtifactError::transport("GetTemplate", e))?;

        Ok(output.template_body)
    }
}

fn sdk_stage(stage: TemplateStage) -> SdkTemplateStage {
    match stage {
        TemplateStage::Original => SdkTemplateStage::Original,
        TemplateStage::Processed => SdkTemplateStage::Processed,
    }
}
