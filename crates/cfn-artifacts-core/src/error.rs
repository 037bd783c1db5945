//! Error types for template inspection and artifact download

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error from an underlying SDK or transport layer
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while fetching a template or downloading artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The control plane returned no template body for the stack
    #[error("stack not found: {stack}")]
    StackNotFound { stack: String },

    /// A recognized resource type is missing a field the locator needs
    #[error("malformed resource '{resource}': {field} {reason}")]
    MalformedResource {
        resource: String,
        /// Dotted path of the offending field, e.g. `Properties.Code.S3Key`
        field: String,
        reason: &'static str,
    },

    /// Any failure from the CloudFormation or S3 client (auth, network, missing object)
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// A downloaded file could not be read as a zip archive
    #[error("invalid archive '{}': {source}", .path.display())]
    InvalidArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Local filesystem failure
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template body is not a structured mapping
    #[error("failed to parse template body: {reason}")]
    TemplateParse { reason: String },

    /// Progress output could not be written
    #[error("failed to write progress output: {0}")]
    Output(#[source] std::io::Error),

    /// The template could not be rendered in the requested format
    #[error("failed to render template: {reason}")]
    Render { reason: String },
}

impl ArtifactError {
    pub fn transport<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport {
            operation,
            source: source.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing(resource: &str, field: &str) -> Self {
        Self::MalformedResource {
            resource: resource.to_string(),
            field: field.to_string(),
            reason: "is missing",
        }
    }

    pub(crate) fn not_a_string(resource: &str, field: &str) -> Self {
        Self::MalformedResource {
            resource: resource.to_string(),
            field: field.to_string(),
            reason: "must be a string",
        }
    }
}

/// Result type alias for ArtifactError
pub type Result<T> = std::result::Result<T, ArtifactError>;
