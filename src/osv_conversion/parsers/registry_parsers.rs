use super::MavenNaming;
use crate::osv_conversion::domain::{Ecosystem, OsvPackage, VulnerabilityRequest};
use crate::shared::error::ParseError;

/// Parsers for package-registry external references (`maven-central`,
/// `npm`, `nuget`, `bower`).
///
/// Each builds a fresh purl for the registries that have a purl type.
pub struct RegistryParser;

impl RegistryParser {
    /// `group:artifact[:version]`
    pub fn parse_maven_central(
        locator: &str,
        maven_naming: MavenNaming,
    ) -> Result<VulnerabilityRequest, ParseError> {
        let mismatch = || ParseError::mismatch("maven-central", locator, "group:artifact[:version]");

        let mut parts = locator.split(':');
        let group = parts.next().filter(|g| !g.is_empty()).ok_or_else(mismatch)?;
        let artifact = parts.next().filter(|a| !a.is_empty()).ok_or_else(mismatch)?;
        let version = parts.next().filter(|v| !v.is_empty());

        let name = match maven_naming {
            MavenNaming::ArtifactOnly => artifact.to_string(),
            MavenNaming::GroupQualified => format!("{}:{}", group, artifact),
        };
        let purl = with_version(format!("pkg:maven/{}/{}", group, artifact), version);

        let package = OsvPackage::new(name, Some(Ecosystem::Maven), Some(purl))?;
        Ok(VulnerabilityRequest::package(package, version.map(str::to_string)))
    }

    /// `name[@version]`, scoped names (`@scope/name`) included.
    pub fn parse_npm(locator: &str) -> Result<VulnerabilityRequest, ParseError> {
        let (name, version) = match locator.rfind('@') {
            Some(at) if at > 0 => (&locator[..at], Some(&locator[at + 1..])),
            _ => (locator, None),
        };
        let version = version.filter(|v| !v.is_empty());
        if name.is_empty() || name == "@" || name.contains(char::is_whitespace) {
            return Err(ParseError::mismatch("npm", locator, "[@scope/]name[@version]"));
        }

        let purl = with_version(npm_purl(name), version);
        let package = OsvPackage::new(name, Some(Ecosystem::Npm), Some(purl))?;
        Ok(VulnerabilityRequest::package(package, version.map(str::to_string)))
    }

    /// `name/version`
    pub fn parse_nuget(locator: &str) -> Result<VulnerabilityRequest, ParseError> {
        let (name, version) = match locator.split_once('/') {
            Some((name, version)) => (name, Some(version).filter(|v| !v.is_empty())),
            None => (locator, None),
        };
        if name.is_empty() || version.is_some_and(|v| v.contains('/')) {
            return Err(ParseError::mismatch("nuget", locator, "name/version"));
        }

        let purl = with_version(format!("pkg:nuget/{}", name), version);
        let package = OsvPackage::new(name, Some(Ecosystem::NuGet), Some(purl))?;
        Ok(VulnerabilityRequest::package(package, version.map(str::to_string)))
    }

    /// `name[#version]`. Bower has no purl type, so the identity is a bare
    /// name under the default ecosystem.
    pub fn parse_bower(locator: &str) -> Result<VulnerabilityRequest, ParseError> {
        let (name, version) = match locator.split_once('#') {
            Some((name, version)) => (name, Some(version)),
            None => (locator, None),
        };
        if name.is_empty() {
            return Err(ParseError::mismatch("bower", locator, "name#version"));
        }

        let package = OsvPackage::new(name, Some(Ecosystem::OssFuzz), None)?;
        Ok(VulnerabilityRequest::package(package, version.map(str::to_string)))
    }
}

/// Purl for an npm package: `@` is percent-encoded wherever it appears in
/// the name, so the scope marker never collides with the version separator.
pub(crate) fn npm_purl(name: &str) -> String {
    format!("pkg:npm/{}", name.replace('@', "%40"))
}

pub(crate) fn with_version(purl: String, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}@{}", purl, version),
        None => purl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maven_central_naming_modes() {
        let qualified =
            RegistryParser::parse_maven_central("org.spdx:tools-java:2.2.2", MavenNaming::GroupQualified)
                .unwrap();
        let package = qualified.package_identity().unwrap();
        assert_eq!(package.name(), "org.spdx:tools-java");
        assert_eq!(package.purl(), Some("pkg:maven/org.spdx/tools-java@2.2.2"));
        assert_eq!(package.ecosystem(), Some(Ecosystem::Maven));
        assert_eq!(qualified.version(), Some("2.2.2"));

        let artifact =
            RegistryParser::parse_maven_central("org.spdx:tools-java:2.2.2", MavenNaming::ArtifactOnly)
                .unwrap();
        let package = artifact.package_identity().unwrap();
        assert_eq!(package.name(), "tools-java");
        assert_eq!(package.purl(), Some("pkg:maven/org.spdx/tools-java@2.2.2"));
        assert_eq!(artifact.version(), Some("2.2.2"));
    }

    #[test]
    fn test_maven_central_without_version() {
        let request =
            RegistryParser::parse_maven_central("org.spdx:tools-java", MavenNaming::ArtifactOnly).unwrap();
        assert!(request.needs_version());
        assert_eq!(
            request.package_identity().unwrap().purl(),
            Some("pkg:maven/org.spdx/tools-java")
        );
    }

    #[test]
    fn test_maven_central_requires_group_and_artifact() {
        for locator in ["tools-java", "", ":tools-java", "org.spdx:"] {
            let result = RegistryParser::parse_maven_central(locator, MavenNaming::ArtifactOnly);
            assert!(
                matches!(result, Err(ParseError::PatternMismatch { kind: "maven-central", .. })),
                "{} should be rejected",
                locator
            );
        }
    }

    #[test]
    fn test_npm_plain() {
        let request = RegistryParser::parse_npm("tinymce@4.9.11").unwrap();
        let package = request.package_identity().unwrap();
        assert_eq!(package.name(), "tinymce");
        assert_eq!(package.ecosystem(), Some(Ecosystem::Npm));
        assert_eq!(package.purl(), Some("pkg:npm/tinymce@4.9.11"));
        assert_eq!(request.version(), Some("4.9.11"));
    }

    #[test]
    fn test_npm_scoped() {
        let request = RegistryParser::parse_npm("@angular/cli@13.1.2").unwrap();
        let package = request.package_identity().unwrap();
        assert_eq!(package.name(), "@angular/cli");
        assert_eq!(package.purl(), Some("pkg:npm/%40angular/cli@13.1.2"));
        assert_eq!(request.version(), Some("13.1.2"));

        let request = RegistryParser::parse_npm("@angular/cli").unwrap();
        assert!(request.needs_version());
        assert_eq!(
            request.package_identity().unwrap().purl(),
            Some("pkg:npm/%40angular/cli")
        );
    }

    #[test]
    fn test_npm_rejects_blank() {
        assert!(RegistryParser::parse_npm("").is_err());
        assert!(RegistryParser::parse_npm("@").is_err());
        assert!(RegistryParser::parse_npm("has space@1.0").is_err());
    }

    #[test]
    fn test_nuget() {
        let request = RegistryParser::parse_nuget("Newtonsoft.Json/13.0.1").unwrap();
        let package = request.package_identity().unwrap();
        assert_eq!(package.name(), "Newtonsoft.Json");
        assert_eq!(package.ecosystem(), Some(Ecosystem::NuGet));
        assert_eq!(package.purl(), Some("pkg:nuget/Newtonsoft.Json@13.0.1"));
        assert_eq!(request.version(), Some("13.0.1"));

        assert!(RegistryParser::parse_nuget("/13.0.1").is_err());
        assert!(RegistryParser::parse_nuget("a/b/c").is_err());
    }

    #[test]
    fn test_bower() {
        let request = RegistryParser::parse_bower("modernizr#2.6.2").unwrap();
        let package = request.package_identity().unwrap();
        assert_eq!(package.name(), "modernizr");
        assert_eq!(package.ecosystem(), Some(Ecosystem::OssFuzz));
        assert_eq!(package.purl(), None);
        assert_eq!(request.version(), Some("2.6.2"));

        assert!(RegistryParser::parse_bower("#2.6.2").is_err());
    }
}
