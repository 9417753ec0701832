use super::relationship::Relationship;
use std::collections::HashMap;

/// External reference attached to a package: a type (short name such as
/// `purl` or a full URI ending in `/purl`) and its locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub reference_type: String,
    pub locator: String,
}

impl ExternalReference {
    pub fn new(reference_type: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            reference_type: reference_type.into(),
            locator: locator.into(),
        }
    }
}

/// Package element as seen by the conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbomPackage {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub download_location: Option<String>,
    pub external_refs: Vec<ExternalReference>,
}

impl SbomPackage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_download_location(mut self, location: impl Into<String>) -> Self {
        self.download_location = Some(location.into());
        self
    }

    pub fn with_external_ref(
        mut self,
        reference_type: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        self.external_refs
            .push(ExternalReference::new(reference_type, locator));
        self
    }

    /// Name used for logging: the declared name, or the element id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Package,
    File,
}

/// Read-only document model handed over by a `DocumentReader`.
#[derive(Debug, Clone, Default)]
pub struct SbomDocument {
    document_id: String,
    packages: Vec<SbomPackage>,
    file_ids: Vec<String>,
    relationships: Vec<Relationship>,
    roots: Vec<String>,
    package_index: HashMap<String, usize>,
}

impl SbomDocument {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..Default::default()
        }
    }

    pub fn with_package(mut self, package: SbomPackage) -> Self {
        self.add_package(package);
        self
    }

    pub fn with_file(mut self, id: impl Into<String>) -> Self {
        self.file_ids.push(id.into());
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn with_root(mut self, id: impl Into<String>) -> Self {
        self.add_root(id);
        self
    }

    pub fn add_package(&mut self, package: SbomPackage) {
        self.package_index
            .insert(package.id.clone(), self.packages.len());
        self.packages.push(package);
    }

    /// Registers a root once; later duplicates are ignored.
    pub fn add_root(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn packages(&self) -> &[SbomPackage] {
        &self.packages
    }

    pub fn file_ids(&self) -> &[String] {
        &self.file_ids
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn package(&self, id: &str) -> Option<&SbomPackage> {
        self.package_index.get(id).map(|&i| &self.packages[i])
    }

    pub fn element_kind(&self, id: &str) -> Option<ElementKind> {
        if self.package_index.contains_key(id) {
            Some(ElementKind::Package)
        } else if self.file_ids.iter().any(|f| f == id) {
            Some(ElementKind::File)
        } else {
            None
        }
    }
}
