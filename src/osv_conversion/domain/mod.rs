pub mod cpe;
pub mod diagnostic;
pub mod osv_package;
pub mod relationship;
pub mod sbom_document;
pub mod vulnerability;
pub mod vulnerability_request;

pub use cpe::{CpeAttributes, CpePart};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use osv_package::{Ecosystem, OsvPackage};
pub use relationship::{Relationship, RelationshipType, RelevanceClass};
pub use sbom_document::{ElementKind, ExternalReference, SbomDocument, SbomPackage};
pub use vulnerability::{Affected, AffectedPackage, OsvVulnerability};
pub use vulnerability_request::VulnerabilityRequest;
