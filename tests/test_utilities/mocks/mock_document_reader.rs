use spdx_to_osv::prelude::*;
use std::path::Path;

/// Mock DocumentReader handing out a prepared document
pub struct MockDocumentReader {
    pub document: Option<SbomDocument>,
}

impl MockDocumentReader {
    pub fn new(document: SbomDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    pub fn with_failure() -> Self {
        Self { document: None }
    }
}

impl DocumentReader for MockDocumentReader {
    fn read_document(&self, _path: &Path, _format: InputFormat) -> Result<SbomDocument> {
        match &self.document {
            Some(document) => Ok(document.clone()),
            None => anyhow::bail!("Mock document reader failure"),
        }
    }
}
