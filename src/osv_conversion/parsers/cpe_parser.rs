use crate::osv_conversion::domain::{CpeAttributes, CpePart, OsvPackage, VulnerabilityRequest};
use crate::shared::error::ParseError;

const CPE22_PREFIX: &str = "cpe:/";
const CPE23_PREFIX: &str = "cpe:2.3:";

/// Number of components after the `cpe:2.3:` prefix.
const CPE23_COMPONENTS: usize = 11;

/// Maximum number of components after the `cpe:/` prefix (part + 6 fields).
const CPE22_MAX_COMPONENTS: usize = 7;

const CPE22_GRAMMAR: &str = "cpe:/[aho]?(:vendor(:product(:version(:update(:edition(:language)?)?)?)?)?)?";
const CPE23_GRAMMAR: &str = "cpe:2.3:part:vendor:product:version:update:edition:language:sw_edition:target_sw:target_hw:other";

/// Result of decoding a CPE locator: the attributes, plus a request when a
/// product is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCpe {
    pub attributes: CpeAttributes,
    pub request: Option<VulnerabilityRequest>,
}

/// Decoder for CPE 2.2 URIs and CPE 2.3 formatted strings.
pub struct CpeParser;

impl CpeParser {
    /// Decodes either CPE binding, chosen by prefix.
    pub fn parse(locator: &str) -> Result<ParsedCpe, ParseError> {
        let attributes = if locator.starts_with(CPE23_PREFIX) {
            Self::parse_cpe23(locator)?
        } else if locator.starts_with(CPE22_PREFIX) {
            Self::parse_cpe22(locator)?
        } else {
            return Err(ParseError::mismatch(
                "CPE",
                locator,
                format!("{} | {}", CPE22_GRAMMAR, CPE23_GRAMMAR),
            ));
        };

        let request = Self::request_for(&attributes);
        Ok(ParsedCpe {
            attributes,
            request,
        })
    }

    /// Package request named after the product, when there is one.
    pub fn request_for(attributes: &CpeAttributes) -> Option<VulnerabilityRequest> {
        let product = attributes.product.as_deref()?;
        let package = OsvPackage::named(product).ok()?;
        Some(VulnerabilityRequest::package(
            package,
            attributes.version.clone(),
        ))
    }

    /// CPE 2.2 URI binding: `cpe:/part:vendor:product:version:update:edition:language`.
    ///
    /// Trailing components may be omitted. Values are percent-decoded and the
    /// edition may use the `~` packed form carrying the 2.3 extended fields.
    pub fn parse_cpe22(locator: &str) -> Result<CpeAttributes, ParseError> {
        let mismatch = || ParseError::mismatch("CPE 2.2", locator, CPE22_GRAMMAR);

        let body = locator.strip_prefix(CPE22_PREFIX).ok_or_else(mismatch)?;
        let components: Vec<&str> = body.split(':').collect();
        if components.len() > CPE22_MAX_COMPONENTS {
            return Err(mismatch());
        }
        if !components.iter().all(|c| Self::is_cpe22_component(c)) {
            return Err(mismatch());
        }

        let part = match components[0] {
            "" => None,
            marker => match marker {
                "a" | "o" | "h" => CpePart::from_marker(marker),
                _ => return Err(mismatch()),
            },
        };

        let mut values = Vec::with_capacity(CPE22_MAX_COMPONENTS - 1);
        for raw in components.iter().skip(1) {
            values.push(Self::decode_cpe22_value(raw).ok_or_else(mismatch)?);
        }
        let mut field = |i: usize| values.get_mut(i).and_then(Option::take);

        let mut attributes = CpeAttributes {
            part,
            vendor: field(0),
            product: field(1),
            version: field(2),
            update: field(3),
            edition: None,
            language: field(5),
            ..Default::default()
        };

        if let Some(edition) = field(4) {
            if let Some(packed) = edition.strip_prefix('~') {
                let packed: Vec<&str> = packed.split('~').collect();
                if packed.len() != 5 {
                    return Err(mismatch());
                }
                attributes.edition = Self::normalize(packed[0]);
                attributes.sw_edition = Self::normalize(packed[1]);
                attributes.target_sw = Self::normalize(packed[2]);
                attributes.target_hw = Self::normalize(packed[3]);
                attributes.other = Self::normalize(packed[4]);
            } else {
                attributes.edition = Some(edition);
            }
        }

        Ok(attributes)
    }

    fn is_cpe22_component(component: &str) -> bool {
        component
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '~' | '%'))
    }

    /// Percent-decodes one 2.2 value. `Some(None)` is an absent value,
    /// `None` a malformed escape.
    fn decode_cpe22_value(raw: &str) -> Option<Option<String>> {
        if raw.contains('~') && !raw.starts_with('~') {
            return None;
        }
        let decoded = urlencoding::decode(raw).ok()?;
        Some(Self::normalize(&decoded))
    }

    /// CPE 2.3 formatted string binding with exactly eleven components.
    ///
    /// Components are split on unescaped colons first and decoded one by one,
    /// so an escaped `\:` inside a value can never shift later fields.
    pub fn parse_cpe23(locator: &str) -> Result<CpeAttributes, ParseError> {
        let mismatch = || ParseError::mismatch("CPE 2.3", locator, CPE23_GRAMMAR);

        let body = locator.strip_prefix(CPE23_PREFIX).ok_or_else(mismatch)?;
        let components = Self::split_cpe23(body).ok_or_else(mismatch)?;
        if components.len() != CPE23_COMPONENTS {
            return Err(mismatch());
        }

        let part = match components[0].as_str() {
            "" => None,
            marker => Some(CpePart::from_marker(marker).ok_or_else(mismatch)?),
        };

        let mut values = Vec::with_capacity(CPE23_COMPONENTS - 1);
        for raw in &components[1..] {
            values.push(Self::decode_cpe23_value(raw).ok_or_else(mismatch)?);
        }
        let mut values = values.into_iter();
        let mut next = || values.next().flatten();

        Ok(CpeAttributes {
            part,
            vendor: next(),
            product: next(),
            version: next(),
            update: next(),
            edition: next(),
            language: next(),
            sw_edition: next(),
            target_sw: next(),
            target_hw: next(),
            other: next(),
        })
    }

    /// Splits on unescaped `:`, keeping escapes intact. Returns `None` on a
    /// dangling backslash.
    fn split_cpe23(body: &str) -> Option<Vec<String>> {
        let mut components = Vec::new();
        let mut current = String::new();
        let mut chars = body.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    current.push(c);
                    current.push(chars.next()?);
                }
                ':' => components.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        components.push(current);
        Some(components)
    }

    /// Validates and unescapes one 2.3 value. `Some(None)` is an absent value
    /// (`*`, `-`, or empty), `None` an illegal character.
    fn decode_cpe23_value(raw: &str) -> Option<Option<String>> {
        if raw == "*" || raw == "-" || raw.is_empty() {
            return Some(None);
        }

        let mut value = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let escaped = chars.next()?;
                    if escaped.is_ascii_alphanumeric() || !escaped.is_ascii() {
                        return None;
                    }
                    value.push(escaped);
                }
                c if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '*' | '?') => {
                    value.push(c)
                }
                _ => return None,
            }
        }
        Some(Some(value))
    }

    fn normalize(value: &str) -> Option<String> {
        match value {
            "" | "*" | "-" => None,
            other => Some(other.to_string()),
        }
    }
}
