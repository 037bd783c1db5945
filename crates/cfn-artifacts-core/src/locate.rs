//! Mapping from a resource definition to the S3 object holding its deployment package

use crate::error::{ArtifactError, Result};
use crate::template::Resource;
use serde_yaml::Value;
use std::fmt;
use tracing::debug;

/// Resource types the locator understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceType {
    /// `AWS::Lambda::Function`, package under `Properties.Code`
    LambdaFunction,
    /// `AWS::Lambda::LayerVersion`, package under `Properties.Content`
    LambdaLayerVersion,
    Other(String),
}

impl ResourceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::LambdaFunction => "AWS::Lambda::Function",
            Self::LambdaLayerVersion => "AWS::Lambda::LayerVersion",
            Self::Other(name) => name,
        }
    }

    /// Property that carries `S3Bucket`/`S3Key` for this type, if any
    fn artifact_property(&self) -> Option<&'static str> {
        match self {
            Self::LambdaFunction => Some("Code"),
            Self::LambdaLayerVersion => Some("Content"),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        match value {
            "AWS::Lambda::Function" => Self::LambdaFunction,
            "AWS::Lambda::LayerVersion" => Self::LambdaLayerVersion,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of an object in S3
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    pub bucket: String,
    pub key: String,
}

impl ArtifactRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Find the S3 artifact referenced by a resource.
///
/// Returns `Ok(None)` for types that carry no artifact. For recognized types
/// every field on the path to `S3Bucket`/`S3Key` must be present.
pub fn locate(resource: &Resource<'_>) -> Result<Option<ArtifactRef>> {
    let name = resource.name;
    let type_name = string_field(name, resource.definition, "Type", "Type")?;
    let resource_type = ResourceType::from(type_name);

    let Some(property) = resource_type.artifact_property() else {
        debug!(resource = name, resource_type = %resource_type, "no artifact for resource type");
        return Ok(None);
    };

    let properties = field(name, resource.definition, "Properties", "Properties")?;
    let location_path = format!("Properties.{}", property);
    let location = field(name, properties, property, &location_path)?;

    let bucket = string_field(
        name,
        location,
        "S3Bucket",
        &format!("{}.S3Bucket", location_path),
    )?;
    let key = string_field(
        name,
        location,
        "S3Key",
        &format!("{}.S3Key", location_path),
    )?;

    let artifact = ArtifactRef::new(bucket, key);
    debug!(resource = name, resource_type = %resource_type, %artifact, "located artifact");
    Ok(Some(artifact))
}

fn field<'v>(resource: &str, value: &'v Value, key: &str, path: &str) -> Result<&'v Value> {
    value
        .get(key)
        .ok_or_else(|| ArtifactError::missing(resource, path))
}

/// Tagged scalars such as `!Ref Bucket` are not plain strings, so the match
/// is on the value itself rather than `Value::as_str`, which strips tags.
fn string_field<'v>(resource: &str, value: &'v Value, key: &str, path: &str) -> Result<&'v str> {
    match field(resource, value, key, path)? {
        Value::String(s) => Ok(s.as_str()),
        _ => Err(ArtifactError::not_a_string(resource, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn locate_in(name: &str, yaml: &str) -> Result<Option<ArtifactRef>> {
        let definition = definition(yaml);
        locate(&Resource {
            name,
            definition: &definition,
        })
    }

    #[test]
    fn lambda_function_uses_code() {
        let artifact = locate_in(
            "Handler",
            r#"
Type: AWS::Lambda::Function
Properties:
  Runtime: provided.al2023
  Code:
    S3Bucket: b
    S3Key: k
"#,
        )
        .unwrap();

        assert_eq!(artifact, Some(ArtifactRef::new("b", "k")));
    }

    #[test]
    fn layer_version_uses_content() {
        let artifact = locate_in(
            "Deps",
            r#"
Type: AWS::Lambda::LayerVersion
Properties:
  Content:
    S3Bucket: b2
    S3Key: k2
"#,
        )
        .unwrap();

        assert_eq!(artifact, Some(ArtifactRef::new("b2", "k2")));
    }

    #[test]
    fn other_types_have_no_artifact() {
        let artifact = locate_in(
            "Data",
            r#"
Type: AWS::S3::Bucket
Properties:
  BucketName: data
"#,
        )
        .unwrap();

        assert_eq!(artifact, None);
    }

    #[test]
    fn unrecognized_type_needs_no_properties() {
        let artifact = locate_in("Topic", "Type: AWS::SNS::Topic\n").unwrap();
        assert_eq!(artifact, None);
    }

    #[test]
    fn missing_key_is_malformed() {
        let err = locate_in(
            "Handler",
            r#"
Type: AWS::Lambda::Function
Properties:
  Code:
    S3Bucket: b
"#,
        )
        .unwrap_err();

        match err {
            ArtifactError::MalformedResource {
                resource, field, ..
            } => {
                assert_eq!(resource, "Handler");
                assert_eq!(field, "Properties.Code.S3Key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inline_code_is_malformed() {
        let err = locate_in(
            "Inline",
            r#"
Type: AWS::Lambda::Function
Properties:
  Code:
    ZipFile: "exports.handler = async () => {}"
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ArtifactError::MalformedResource { .. }));
    }

    #[test]
    fn missing_properties_is_malformed() {
        let err = locate_in("Layer", "Type: AWS::Lambda::LayerVersion\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed resource 'Layer': Properties is missing"
        );
    }

    #[test]
    fn intrinsic_bucket_is_malformed() {
        let err = locate_in(
            "Handler",
            r#"
Type: AWS::Lambda::Function
Properties:
  Code:
    S3Bucket: !Ref ArtifactBucket
    S3Key: k
"#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "malformed resource 'Handler': Properties.Code.S3Bucket must be a string"
        );
    }

    #[test]
    fn intrinsic_key_is_malformed() {
        let err = locate_in(
            "Handler",
            r#"
Type: AWS::Lambda::Function
Properties:
  Code:
    S3Bucket: deploy-artifacts
    S3Key: !Sub '${Prefix}/fn.zip'
"#,
        )
        .unwrap_err();

        match err {
            ArtifactError::MalformedResource {
                resource, field, ..
            } => {
                assert_eq!(resource, "Handler");
                assert_eq!(field, "Properties.Code.S3Key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn intrinsic_layer_location_is_malformed() {
        let err = locate_in(
            "Deps",
            r#"
Type: AWS::Lambda::LayerVersion
Properties:
  Content:
    S3Bucket: !Ref ArtifactBucket
    S3Key: !Sub '${Prefix}/layer.zip'
"#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "malformed resource 'Deps': Properties.Content.S3Bucket must be a string"
        );
    }

    #[test]
    fn tagged_type_is_malformed() {
        let err = locate_in("Odd", "Type: !Ref TypeParam
").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed resource 'Odd': Type must be a string"
        );
    }

    #[test]
    fn missing_type_is_malformed() {
        let err = locate_in("Nameless", "Properties: {}\n").unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedResource { .. }));
    }

    #[test]
    fn resource_type_round_trips_names() {
        for name in [
            "AWS::Lambda::Function",
            "AWS::Lambda::LayerVersion",
            "AWS::DynamoDB::Table",
        ] {
            assert_eq!(ResourceType::from(name).as_str(), name);
        }
        assert_eq!(
            ResourceType::from("AWS::Lambda::Function"),
            ResourceType::LambdaFunction
        );
    }

    #[test]
    fn artifact_ref_displays_as_s3_uri() {
        assert_eq!(
            ArtifactRef::new("deploy-bucket", "fn/abc.zip").to_string(),
            "s3://deploy-bucket/fn/abc.zip"
        );
    }
}
