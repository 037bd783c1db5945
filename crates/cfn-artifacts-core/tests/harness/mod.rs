//! In-memory control plane and object store for workflow tests

use async_trait::async_trait;
use cfn_artifacts_core::{
    ArtifactError, ArtifactRef, ArtifactStore, Result, TemplateSource, TemplateStage,
};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Mutex;
use zip::write::FileOptions;

/// Serves template bodies keyed by stack name
#[derive(Default)]
pub struct FakeTemplates {
    bodies: HashMap<String, String>,
    failure: Option<String>,
    pub requests: Mutex<Vec<(String, TemplateStage)>>,
}

impl FakeTemplates {
    pub fn with_stack(mut self, stack_name: &str, body: &str) -> Self {
        self.bodies.insert(stack_name.to_string(), body.to_string());
        self
    }

    /// Fail every request as a transport error with this message
    pub fn failing_with(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }
}

#[async_trait]
impl TemplateSource for FakeTemplates {
    async fn get_template(
        &self,
        stack_name: &str,
        stage: TemplateStage,
    ) -> Result<Option<String>> {
        self.requests
            .lock()
            .unwrap()
            .push((stack_name.to_string(), stage));
        if let Some(message) = &self.failure {
            return Err(ArtifactError::transport("GetTemplate", message.clone()));
        }
        Ok(self.bodies.get(stack_name).cloned())
    }
}

/// Serves object bytes keyed by bucket and key, recording every request
#[derive(Default)]
pub struct FakeStore {
    objects: HashMap<ArtifactRef, Vec<u8>>,
    pub downloads: Mutex<Vec<ArtifactRef>>,
}

impl FakeStore {
    pub fn with_object(mut self, bucket: &str, key: &str, bytes: Vec<u8>) -> Self {
        self.objects.insert(ArtifactRef::new(bucket, key), bytes);
        self
    }

    pub fn downloaded(&self) -> Vec<ArtifactRef> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactStore for FakeStore {
    async fn download_to(&self, artifact: &ArtifactRef, path: &Path) -> Result<()> {
        self.downloads.lock().unwrap().push(artifact.clone());

        let bytes = self.objects.get(artifact).ok_or_else(|| {
            ArtifactError::transport("GetObject", format!("NoSuchKey: {}", artifact))
        })?;
        std::fs::write(path, bytes).map_err(|e| ArtifactError::io(path, e))
    }
}

/// Build a zip archive in memory with entries of the given sizes
pub fn zip_bytes(entries: &[(&str, usize)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, len) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(&vec![b'a'; *len]).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
