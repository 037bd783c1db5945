//! Stack template model and rendering
//!
//! Templates are held as an insertion-ordered `serde_yaml::Mapping`, so
//! rendering emits keys exactly in the order CloudFormation returned them.

use crate::error::{ArtifactError, Result};
use cfn_artifacts_config::TemplateFormat;
use serde_yaml::{Mapping, Value};
use tracing::debug;

const RESOURCES_KEY: &str = "Resources";

/// A deployed stack template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    body: Mapping,
}

/// One entry of the template's `Resources` mapping
#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    /// Logical resource name
    pub name: &'a str,
    /// Resource definition (`Type`, `Properties`, ...)
    pub definition: &'a Value,
}

impl Template {
    /// Parse a template body as returned by `GetTemplate`.
    ///
    /// JSON bodies are decoded with serde_json straight into the ordered YAML
    /// value model; everything else is parsed as YAML, which keeps short-form
    /// intrinsics like `!Ref` as tagged values.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = if body.trim_start().starts_with('{') {
            serde_json::from_str(body).map_err(|e| ArtifactError::TemplateParse {
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(body).map_err(|e| ArtifactError::TemplateParse {
                reason: e.to_string(),
            })?
        };

        match value {
            Value::Mapping(body) => {
                debug!(top_level_keys = body.len(), "parsed template body");
                Ok(Self { body })
            }
            other => Err(ArtifactError::TemplateParse {
                reason: format!("expected a mapping at the top level, found {}", kind(&other)),
            }),
        }
    }

    pub fn from_mapping(body: Mapping) -> Self {
        Self { body }
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.body
    }

    /// Resources in template order. The `Resources` key must be present.
    pub fn resources(&self) -> Result<Vec<Resource<'_>>> {
        let resources = match self.body.get(RESOURCES_KEY) {
            None => {
                return Err(ArtifactError::TemplateParse {
                    reason: "template has no Resources section".to_string(),
                })
            }
            Some(Value::Mapping(resources)) => resources,
            Some(other) => {
                return Err(ArtifactError::TemplateParse {
                    reason: format!("Resources must be a mapping, found {}", kind(other)),
                })
            }
        };

        resources
            .iter()
            .map(|(name, definition)| {
                let name = name.as_str().ok_or_else(|| ArtifactError::TemplateParse {
                    reason: format!("resource logical name must be a string, found {}", kind(name)),
                })?;
                Ok(Resource { name, definition })
            })
            .collect()
    }

    /// Render the template as human-readable text, preserving key order
    pub fn render(&self, format: TemplateFormat) -> Result<String> {
        match format {
            TemplateFormat::Yaml => {
                serde_yaml::to_string(&self.body).map_err(|e| ArtifactError::Render {
                    reason: e.to_string(),
                })
            }
            TemplateFormat::Json => serde_json::to_string_pretty(&self.body)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| ArtifactError::Render {
                    reason: e.to_string(),
                }),
        }
    }
}

/// Render a template in the given format
pub fn render(template: &Template, format: TemplateFormat) -> Result<String> {
    template.render(format)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
