use crate::application::dto::InputFormat;
use crate::osv_conversion::domain::{
    Relationship, RelationshipType, SbomDocument, SbomPackage,
};
use crate::ports::outbound::DocumentReader;
use crate::shared::error::SpdxToOsvError;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// FileSystemReader adapter for reading SPDX documents from the file system
///
/// This adapter implements the DocumentReader port for SPDX 2.x documents
/// in JSON or YAML serialization.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        let metadata = fs::symlink_metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read file metadata: {}", e))?;

        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                path.display()
            );
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let file_size = metadata.len();
        if file_size > MAX_FILE_SIZE {
            anyhow::bail!(
                "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
                path.display(),
                file_size,
                MAX_FILE_SIZE
            );
        }

        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read file: {}", e))
    }

    fn deserialize(content: &str, format: InputFormat) -> std::result::Result<SpdxDocumentDto, String> {
        match format {
            InputFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            InputFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl DocumentReader for FileSystemReader {
    fn read_document(&self, path: &Path, format: InputFormat) -> Result<SbomDocument> {
        if !path.exists() {
            return Err(SpdxToOsvError::InputNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = self
            .safe_read_file(path)
            .map_err(|e| SpdxToOsvError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        let dto = Self::deserialize(&content, format).map_err(|details| {
            SpdxToOsvError::DocumentParseError {
                path: path.to_path_buf(),
                format: format.to_string(),
                details,
            }
        })?;

        let document = dto.into_document()?;
        tracing::debug!(
            path = %path.display(),
            packages = document.packages().len(),
            files = document.file_ids().len(),
            relationships = document.relationships().len(),
            roots = document.roots().len(),
            "SPDX document loaded"
        );
        Ok(document)
    }
}

// SPDX 2.x serialization structures (shared by JSON and YAML)

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocumentDto {
    #[serde(rename = "SPDXID", default)]
    spdx_id: Option<String>,
    #[serde(default)]
    document_describes: Vec<String>,
    #[serde(default)]
    packages: Vec<SpdxPackageDto>,
    #[serde(default)]
    files: Vec<SpdxFileDto>,
    #[serde(default)]
    relationships: Vec<SpdxRelationshipDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackageDto {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version_info: Option<String>,
    #[serde(default)]
    download_location: Option<String>,
    #[serde(default)]
    external_refs: Vec<SpdxExternalRefDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxExternalRefDto {
    reference_type: String,
    reference_locator: String,
}

#[derive(Debug, Deserialize)]
struct SpdxFileDto {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxRelationshipDto {
    spdx_element_id: String,
    relationship_type: RelationshipType,
    #[serde(default)]
    related_spdx_element: Option<String>,
}

/// `NOASSERTION` / `NONE` and empty strings carry no value.
fn asserted(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "NOASSERTION" && v != "NONE"
    })
}

impl SpdxDocumentDto {
    /// Builds the document model.
    ///
    /// Roots are `documentDescribes`, targets of `DESCRIBES` relationships
    /// from the document, and sources of `DESCRIBED_BY` relationships to it.
    fn into_document(self) -> Result<SbomDocument> {
        let document_id = asserted(self.spdx_id).ok_or_else(|| SpdxToOsvError::MissingDocumentRoot {
            details: "The document has no SPDXID".to_string(),
        })?;

        let mut document = SbomDocument::new(document_id.clone());

        for package in self.packages {
            let mut sbom_package = SbomPackage::new(package.spdx_id);
            sbom_package.name = asserted(package.name);
            sbom_package.version = asserted(package.version_info);
            sbom_package.download_location = asserted(package.download_location);
            for reference in package.external_refs {
                sbom_package = sbom_package
                    .with_external_ref(reference.reference_type, reference.reference_locator);
            }
            document.add_package(sbom_package);
        }

        for file in self.files {
            document = document.with_file(file.spdx_id);
        }

        for root in self.document_describes {
            document.add_root(root);
        }

        for relationship in self.relationships {
            let related = asserted(relationship.related_spdx_element);
            match (relationship.relationship_type, related.as_deref()) {
                (RelationshipType::Describes, Some(target))
                    if relationship.spdx_element_id == document_id =>
                {
                    document.add_root(target);
                }
                (RelationshipType::DescribedBy, Some(target)) if target == document_id => {
                    document.add_root(relationship.spdx_element_id.clone());
                }
                _ => {}
            }
            document = document.with_relationship(Relationship::new(
                relationship.spdx_element_id,
                relationship.relationship_type,
                related,
            ));
        }

        Ok(document)
    }
}
