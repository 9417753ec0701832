//! Identifier parsers: each decodes one locator grammar into a
//! [`VulnerabilityRequest`](crate::osv_conversion::domain::VulnerabilityRequest).

pub mod cpe_parser;
pub mod download_location_parser;
pub mod purl_parser;
pub mod reference_dispatcher;
pub mod registry_parsers;
pub mod swh_parser;

pub use cpe_parser::{CpeParser, ParsedCpe};
pub use download_location_parser::{DownloadLocationParser, GithubShape};
pub use purl_parser::{PurlComponents, PurlParser};
pub use reference_dispatcher::{ReferenceDispatcher, ReferenceKind};
pub use registry_parsers::RegistryParser;
pub use swh_parser::{SwhIdentifier, SwhObjectType};

/// How Maven packages are named in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MavenNaming {
    /// `artifact`
    #[default]
    ArtifactOnly,
    /// `group:artifact`
    GroupQualified,
}
