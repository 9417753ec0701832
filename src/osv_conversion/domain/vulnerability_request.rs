use super::osv_package::OsvPackage;
use std::fmt;

/// A single OSV lookup: either a package (optionally pinned to a version)
/// or a source-control commit.
///
/// Equality follows `OsvPackage` identity plus the version, so the same
/// identity derived from different references collapses in a `HashSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VulnerabilityRequest {
    Package {
        package: OsvPackage,
        version: Option<String>,
    },
    Commit(String),
}

impl VulnerabilityRequest {
    pub fn package(package: OsvPackage, version: Option<String>) -> Self {
        VulnerabilityRequest::Package {
            package,
            version: version.filter(|v| !v.is_empty()),
        }
    }

    pub fn commit(commit: impl Into<String>) -> Self {
        VulnerabilityRequest::Commit(commit.into())
    }

    pub fn package_identity(&self) -> Option<&OsvPackage> {
        match self {
            VulnerabilityRequest::Package { package, .. } => Some(package),
            VulnerabilityRequest::Commit(_) => None,
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            VulnerabilityRequest::Package { version, .. } => version.as_deref(),
            VulnerabilityRequest::Commit(_) => None,
        }
    }

    pub fn commit_id(&self) -> Option<&str> {
        match self {
            VulnerabilityRequest::Commit(commit) => Some(commit),
            VulnerabilityRequest::Package { .. } => None,
        }
    }

    /// True when the request carries neither a version nor a commit.
    pub fn needs_version(&self) -> bool {
        matches!(self, VulnerabilityRequest::Package { version: None, .. })
    }

    /// Fills in a missing version; requests that already have one are
    /// returned unchanged.
    pub fn with_fallback_version(self, fallback: &str) -> Self {
        match self {
            VulnerabilityRequest::Package {
                package,
                version: None,
            } => VulnerabilityRequest::package(package, Some(fallback.to_string())),
            other => other,
        }
    }
}

impl fmt::Display for VulnerabilityRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VulnerabilityRequest::Package {
                package,
                version: Some(version),
            } => write!(f, "{} ({})", package, version),
            VulnerabilityRequest::Package {
                package,
                version: None,
            } => write!(f, "{}", package),
            VulnerabilityRequest::Commit(commit) => write!(f, "commit {}", commit),
        }
    }
}
