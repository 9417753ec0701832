/// CPE part marker (`h`, `o`, `a`; `*`/`-` in 2.3 mean no part).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpePart {
    None,
    Hardware,
    OperatingSystem,
    Application,
}

impl CpePart {
    /// Decodes a part marker. Returns `None` for anything that is not a
    /// recognised marker.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "h" => Some(CpePart::Hardware),
            "o" => Some(CpePart::OperatingSystem),
            "a" => Some(CpePart::Application),
            "*" | "-" | "" => Some(CpePart::None),
            _ => None,
        }
    }
}

/// Attribute bag decoded from a CPE 2.2 or 2.3 locator.
///
/// The "any" (`*`) and "not applicable" (`-`) tokens are stored as `None`,
/// never as literal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpeAttributes {
    pub part: Option<CpePart>,
    pub vendor: Option<String>,
    pub product: Option<String>,
    pub version: Option<String>,
    pub update: Option<String>,
    pub edition: Option<String>,
    pub language: Option<String>,
    pub sw_edition: Option<String>,
    pub target_sw: Option<String>,
    pub target_hw: Option<String>,
    pub other: Option<String>,
}
