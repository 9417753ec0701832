use crate::osv_conversion::domain::VulnerabilityRequest;
use crate::shared::error::ParseError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const SWH_GRAMMAR: &str = r"^swh:1:(?P<type>cnt|dir|rev|rel|snp):(?P<hash>[0-9a-f]{40})$";

static SWH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SWH_GRAMMAR).expect("static regex"));

/// Object kind named by a Software Heritage persistent identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwhObjectType {
    Content,
    Directory,
    Revision,
    Release,
    Snapshot,
}

impl SwhObjectType {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cnt" => Some(SwhObjectType::Content),
            "dir" => Some(SwhObjectType::Directory),
            "rev" => Some(SwhObjectType::Revision),
            "rel" => Some(SwhObjectType::Release),
            "snp" => Some(SwhObjectType::Snapshot),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SwhObjectType::Content => "cnt",
            SwhObjectType::Directory => "dir",
            SwhObjectType::Revision => "rev",
            SwhObjectType::Release => "rel",
            SwhObjectType::Snapshot => "snp",
        }
    }
}

/// Parsed `swh:1:<type>:<sha1>` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwhIdentifier {
    object_type: SwhObjectType,
    hash: String,
}

impl SwhIdentifier {
    pub fn parse(locator: &str) -> Result<Self, ParseError> {
        let mismatch = || ParseError::mismatch("SWH", locator, SWH_GRAMMAR);
        let captures = SWH_PATTERN.captures(locator).ok_or_else(mismatch)?;

        let object_type = captures
            .name("type")
            .and_then(|m| SwhObjectType::from_tag(m.as_str()))
            .ok_or_else(mismatch)?;
        let hash = captures.name("hash").ok_or_else(mismatch)?.as_str().to_string();

        Ok(Self { object_type, hash })
    }

    pub fn object_type(&self) -> SwhObjectType {
        self.object_type
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_release(&self) -> bool {
        self.object_type == SwhObjectType::Release
    }

    /// The object hash, queried as a commit.
    pub fn to_request(&self) -> VulnerabilityRequest {
        VulnerabilityRequest::commit(self.hash.clone())
    }
}

impl fmt::Display for SwhIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swh:1:{}:{}", self.object_type.tag(), self.hash)
    }
}
