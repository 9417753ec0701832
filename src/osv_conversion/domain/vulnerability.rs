use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Package named in an OSV `affected` entry.
///
/// Ecosystem is kept as a plain string: OSV knows far more ecosystems than
/// can be queried from a PURL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedPackage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ecosystem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affected {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<AffectedPackage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OSV vulnerability record.
///
/// Only the fields the tool reasons about are typed; everything else is
/// carried through to the output unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsvVulnerability {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub affected: Vec<Affected>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OsvVulnerability {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: None,
            aliases: Vec::new(),
            affected: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn affected_package_names(&self) -> Vec<&str> {
        self.affected
            .iter()
            .filter_map(|a| a.package.as_ref().map(|p| p.name.as_str()))
            .collect()
    }
}
