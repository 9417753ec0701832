use super::cpe_parser::CpeParser;
use super::purl_parser::PurlParser;
use super::registry_parsers::RegistryParser;
use super::swh_parser::SwhIdentifier;
use super::MavenNaming;
use crate::osv_conversion::domain::{ExternalReference, VulnerabilityRequest};
use crate::shared::error::ParseError;

/// External reference kinds that can yield a vulnerability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Cpe22,
    Cpe23,
    MavenCentral,
    Npm,
    NuGet,
    Bower,
    Purl,
    Swh,
}

/// Trailing type segment -> reference kind.
const REFERENCE_KINDS: &[(&str, ReferenceKind)] = &[
    ("cpe22Type", ReferenceKind::Cpe22),
    ("cpe23Type", ReferenceKind::Cpe23),
    ("maven-central", ReferenceKind::MavenCentral),
    ("npm", ReferenceKind::Npm),
    ("nuget", ReferenceKind::NuGet),
    ("bower", ReferenceKind::Bower),
    ("purl", ReferenceKind::Purl),
    ("swh", ReferenceKind::Swh),
];

impl ReferenceKind {
    /// Looks up the kind from a reference type, which is either a short name
    /// (`purl`) or a URI ending in one (`http://spdx.org/rdf/references/purl`).
    pub fn from_reference_type(reference_type: &str) -> Option<Self> {
        let trailing = reference_type
            .rsplit(|c: char| c == '/' || c == '#')
            .next()
            .unwrap_or(reference_type);
        REFERENCE_KINDS
            .iter()
            .find(|(name, _)| *name == trailing)
            .map(|(_, kind)| *kind)
    }
}

pub struct ReferenceDispatcher;

impl ReferenceDispatcher {
    /// Routes one external reference to its parser.
    ///
    /// # Returns
    /// * `Ok(None)` - unknown reference type, or a CPE without a product
    /// * `Ok(Some(_))` - the parsed request
    /// * `Err(_)` - the locator does not fit the grammar of its kind
    pub fn dispatch(
        reference: &ExternalReference,
        maven_naming: MavenNaming,
    ) -> Result<Option<VulnerabilityRequest>, ParseError> {
        let Some(kind) = ReferenceKind::from_reference_type(&reference.reference_type) else {
            return Ok(None);
        };
        let locator = reference.locator.trim();

        let request = match kind {
            // either binding is accepted under either CPE type
            ReferenceKind::Cpe22 | ReferenceKind::Cpe23 => CpeParser::parse(locator)?.request,
            ReferenceKind::MavenCentral => {
                Some(RegistryParser::parse_maven_central(locator, maven_naming)?)
            }
            ReferenceKind::Npm => Some(RegistryParser::parse_npm(locator)?),
            ReferenceKind::NuGet => Some(RegistryParser::parse_nuget(locator)?),
            ReferenceKind::Bower => Some(RegistryParser::parse_bower(locator)?),
            ReferenceKind::Purl => Some(PurlParser::parse(locator, maven_naming)?),
            ReferenceKind::Swh => Some(SwhIdentifier::parse(locator)?.to_request()),
        };
        Ok(request)
    }
}
