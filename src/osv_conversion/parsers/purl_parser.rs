use super::MavenNaming;
use crate::osv_conversion::domain::{Ecosystem, OsvPackage, VulnerabilityRequest};
use crate::shared::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

const PURL_GRAMMAR: &str = r"^pkg:((?P<type>[^?/#@]+)/)((?P<namespace>[^?#@]+)/)?(?P<name>[^?#@]+)(@(?P<version>[^?#]+))?(?P<qualifiers>\?[^#]+)*(?P<subpath>#.+)*$";

static PURL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PURL_GRAMMAR).expect("static regex"));

/// Docker image versions carrying this prefix are content digests.
const DOCKER_DIGEST_PREFIX: &str = "sha256:";

/// Components of a Package URL, borrowed from the locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurlComponents<'a> {
    pub purl_type: &'a str,
    pub namespace: Option<&'a str>,
    pub name: &'a str,
    pub version: Option<&'a str>,
    pub qualifiers: Option<&'a str>,
    pub subpath: Option<&'a str>,
}

pub struct PurlParser;

impl PurlParser {
    /// Splits a Package URL into its components.
    pub fn components(locator: &str) -> Result<PurlComponents<'_>, ParseError> {
        let captures = PURL_PATTERN
            .captures(locator)
            .ok_or_else(|| ParseError::mismatch("Purl", locator, PURL_GRAMMAR))?;
        let group = |name: &str| captures.name(name).map(|m| m.as_str());

        Ok(PurlComponents {
            purl_type: group("type").unwrap_or_default(),
            namespace: group("namespace"),
            name: group("name").unwrap_or_default(),
            version: group("version"),
            qualifiers: group("qualifiers").map(|q| q.trim_start_matches('?')),
            subpath: group("subpath").map(|s| s.trim_start_matches('#')),
        })
    }

    /// Converts a Package URL into a vulnerability request.
    ///
    /// GitHub and Bitbucket versions are commits, as are Docker `sha256:`
    /// digests. Every other purl becomes a package request whose identity
    /// keeps the original locator, qualifiers and subpath included.
    pub fn parse(locator: &str, maven_naming: MavenNaming) -> Result<VulnerabilityRequest, ParseError> {
        let purl = Self::components(locator)?;

        match (purl.purl_type, purl.version) {
            ("github" | "bitbucket", Some(version)) => {
                return Ok(VulnerabilityRequest::commit(version));
            }
            ("docker", Some(version)) => {
                if let Some(digest) = version.strip_prefix(DOCKER_DIGEST_PREFIX) {
                    return Ok(VulnerabilityRequest::commit(digest));
                }
            }
            _ => {}
        }

        let name = match (purl.purl_type, purl.namespace, maven_naming) {
            ("maven", Some(group), MavenNaming::GroupQualified) => {
                format!("{}:{}", group, purl.name)
            }
            _ => purl.name.to_string(),
        };

        let package = OsvPackage::new(
            name,
            Some(Ecosystem::from_purl_type(purl.purl_type)),
            Some(locator.to_string()),
        )?;
        Ok(VulnerabilityRequest::package(
            package,
            purl.version.map(str::to_string),
        ))
    }
}
