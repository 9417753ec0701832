use crate::shared::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// OSV ecosystem a package belongs to.
///
/// Only the ecosystems a PURL type can be mapped onto are listed; everything
/// else is queried under `OSS-Fuzz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ecosystem {
    #[serde(rename = "PyPI")]
    PyPi,
    #[serde(rename = "Go")]
    Go,
    #[serde(rename = "Maven")]
    Maven,
    #[serde(rename = "npm")]
    Npm,
    #[serde(rename = "NuGet")]
    NuGet,
    #[default]
    #[serde(rename = "OSS-Fuzz")]
    OssFuzz,
}

impl Ecosystem {
    /// Maps a PURL type onto an OSV ecosystem.
    ///
    /// Total over all inputs: empty or unknown types map to `OssFuzz`.
    pub fn from_purl_type(purl_type: &str) -> Self {
        match purl_type {
            "pypi" => Ecosystem::PyPi,
            "golang" => Ecosystem::Go,
            "maven" => Ecosystem::Maven,
            "npm" => Ecosystem::Npm,
            "nuget" => Ecosystem::NuGet,
            _ => Ecosystem::OssFuzz,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::PyPi => "PyPI",
            Ecosystem::Go => "Go",
            Ecosystem::Maven => "Maven",
            Ecosystem::Npm => "npm",
            Ecosystem::NuGet => "NuGet",
            Ecosystem::OssFuzz => "OSS-Fuzz",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package identity sent to OSV.
///
/// Two identities are equal when both carry the same purl; without a purl
/// the name alone decides. The ecosystem never takes part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct OsvPackage {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ecosystem: Option<Ecosystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
}

impl OsvPackage {
    pub fn new(
        name: impl Into<String>,
        ecosystem: Option<Ecosystem>,
        purl: Option<String>,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParseError::EmptyPackageName);
        }
        Ok(Self {
            name,
            ecosystem,
            purl,
        })
    }

    /// Identity carrying only a name.
    pub fn named(name: impl Into<String>) -> Result<Self, ParseError> {
        Self::new(name, None, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ecosystem(&self) -> Option<Ecosystem> {
        self.ecosystem
    }

    pub fn purl(&self) -> Option<&str> {
        self.purl.as_deref()
    }

    fn identity_key(&self) -> (bool, &str) {
        match &self.purl {
            Some(purl) => (true, purl.as_str()),
            None => (false, self.name.as_str()),
        }
    }
}

impl PartialEq for OsvPackage {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for OsvPackage {}

impl Hash for OsvPackage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

impl fmt::Display for OsvPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.purl {
            Some(purl) => write!(f, "{}", purl),
            None => write!(f, "{}", self.name),
        }
    }
}
