use crate::osv_conversion::domain::{
    Diagnostic, DiagnosticKind, OsvPackage, SbomPackage, VulnerabilityRequest,
};
use crate::osv_conversion::parsers::{
    DownloadLocationParser, MavenNaming, ReferenceDispatcher, ReferenceKind, SwhIdentifier,
};
use std::collections::{HashMap, HashSet};

/// Accumulates the de-duplicated request set for one document.
///
/// Requests keep their first-insertion order so that query order (and the
/// log) is stable across runs; membership is decided by request identity.
#[derive(Debug, Default)]
pub struct RequestCollector {
    maven_naming: MavenNaming,
    resolved_releases: HashMap<String, String>,
    seen: HashSet<VulnerabilityRequest>,
    requests: Vec<VulnerabilityRequest>,
    diagnostics: Vec<Diagnostic>,
}

impl RequestCollector {
    pub fn new(maven_naming: MavenNaming) -> Self {
        Self {
            maven_naming,
            ..Default::default()
        }
    }

    /// Release hash -> target revision hash. Commit requests naming a
    /// resolved release are queried with the revision instead.
    pub fn with_resolved_releases(mut self, resolved_releases: HashMap<String, String>) -> Self {
        self.resolved_releases = resolved_releases;
        self
    }

    /// Derives every request for one package: its own name and version, each
    /// external reference, and its download location.
    pub fn collect_package(&mut self, package: &SbomPackage) {
        let fallback = package.version.as_deref().filter(|v| !v.is_empty());

        if let (Some(name), Some(version)) = (package.name.as_deref(), fallback) {
            match OsvPackage::named(Self::strip_version_suffix(name)) {
                Ok(identity) => {
                    self.insert(
                        VulnerabilityRequest::package(identity, Some(version.to_string())),
                        fallback,
                        package,
                    );
                }
                Err(e) => tracing::debug!(package = %package.id, error = %e, "skipping own-name request"),
            }
        }

        for reference in &package.external_refs {
            match ReferenceDispatcher::dispatch(reference, self.maven_naming) {
                Ok(Some(request)) => {
                    self.insert(request, fallback, package);
                }
                Ok(None) => {}
                Err(e) => self.record(
                    DiagnosticKind::PatternMismatch,
                    format!("{}: skipping {} reference: {}", package.display_name(), reference.reference_type, e),
                ),
            }
        }

        match DownloadLocationParser::parse(package.download_location.as_deref()) {
            Ok(Some(request)) => {
                self.insert(request, fallback, package);
            }
            Ok(None) => {}
            Err(e) => self.record(
                DiagnosticKind::PatternMismatch,
                format!("{}: skipping download location: {}", package.display_name(), e),
            ),
        }
    }

    /// Adds one request, completing a missing version from `fallback`.
    ///
    /// # Returns
    /// `true` when the set grew. A request that stays without version or
    /// commit is dropped with an `UnresolvableIdentity` diagnostic.
    pub fn insert(
        &mut self,
        request: VulnerabilityRequest,
        fallback: Option<&str>,
        source: &SbomPackage,
    ) -> bool {
        let request = match (request.needs_version(), fallback) {
            (false, _) => request,
            (true, Some(version)) => request.with_fallback_version(version),
            (true, None) => {
                self.record(
                    DiagnosticKind::UnresolvableIdentity,
                    format!(
                        "{}: no version or commit for {}, request dropped",
                        source.display_name(),
                        request
                    ),
                );
                return false;
            }
        };
        let request = self.substitute_release(request);

        if self.seen.contains(&request) {
            return false;
        }
        tracing::debug!(package = %source.id, request = %request, "request added");
        self.seen.insert(request.clone());
        self.requests.push(request);
        true
    }

    fn substitute_release(&self, request: VulnerabilityRequest) -> VulnerabilityRequest {
        match request.commit_id().and_then(|c| self.resolved_releases.get(c)) {
            Some(revision) => VulnerabilityRequest::commit(revision.clone()),
            None => request,
        }
    }

    fn record(&mut self, kind: DiagnosticKind, message: String) {
        tracing::warn!(kind = %kind, "{}", message);
        self.diagnostics.push(Diagnostic::new(kind, message));
    }

    /// `name@version` -> `name`; a leading scope `@` is not a separator.
    fn strip_version_suffix(name: &str) -> &str {
        match name.rfind('@') {
            Some(at) if at > 0 => &name[..at],
            _ => name,
        }
    }

    /// Software Heritage release identifiers referenced by the packages.
    pub fn release_identifiers<'p>(
        packages: impl IntoIterator<Item = &'p SbomPackage>,
    ) -> Vec<SwhIdentifier> {
        let mut seen = HashSet::new();
        packages
            .into_iter()
            .flat_map(|p| p.external_refs.iter())
            .filter(|r| ReferenceKind::from_reference_type(&r.reference_type) == Some(ReferenceKind::Swh))
            .filter_map(|r| SwhIdentifier::parse(r.locator.trim()).ok())
            .filter(|id| id.is_release() && seen.insert(id.hash().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn requests(&self) -> &[VulnerabilityRequest] {
        &self.requests
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Vec<VulnerabilityRequest>, Vec<Diagnostic>) {
        (self.requests, self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osv_conversion::domain::Ecosystem;

    fn collect(package: &SbomPackage, naming: MavenNaming) -> RequestCollector {
        let mut collector = RequestCollector::new(naming);
        collector.collect_package(package);
        collector
    }

    #[test]
    fn test_npm_reference_yields_single_request() {
        let package = SbomPackage::new("SPDXRef-tinymce")
            .with_name("tinymce")
            .with_external_ref("npm", "tinymce@4.9.11");

        let collector = collect(&package, MavenNaming::ArtifactOnly);
        assert_eq!(collector.len(), 1);

        let request = &collector.requests()[0];
        let identity = request.package_identity().unwrap();
        assert_eq!(identity.name(), "tinymce");
        assert_eq!(identity.ecosystem(), Some(Ecosystem::Npm));
        assert_eq!(identity.purl(), Some("pkg:npm/tinymce@4.9.11"));
        assert_eq!(request.version(), Some("4.9.11"));
    }

    #[test]
    fn test_github_commit_tree_download_location() {
        let package = SbomPackage::new("SPDXRef-jinja")
            .with_download_location("https://github.com/pallets/jinja/tree/6879efc2c1596d11a6a6ad296f80063b558d5e0f");

        let collector = collect(&package, MavenNaming::ArtifactOnly);
        assert_eq!(collector.len(), 1);
        assert_eq!(
            collector.requests()[0].commit_id(),
            Some("6879efc2c1596d11a6a6ad296f80063b558d5e0f")
        );
    }

    #[test]
    fn test_maven_central_naming_modes() {
        let package = SbomPackage::new("SPDXRef-tools")
            .with_external_ref("maven-central", "org.spdx:tools-java:2.2.2");

        for (naming, expected) in [
            (MavenNaming::GroupQualified, "org.spdx:tools-java"),
            (MavenNaming::ArtifactOnly, "tools-java"),
        ] {
            let collector = collect(&package, naming);
            assert_eq!(collector.len(), 1);
            let request = &collector.requests()[0];
            let identity = request.package_identity().unwrap();
            assert_eq!(identity.name(), expected);
            assert_eq!(identity.purl(), Some("pkg:maven/org.spdx/tools-java@2.2.2"));
            assert_eq!(request.version(), Some("2.2.2"));
        }
    }

    #[test]
    fn test_insert_is_idempotent() {
        let source = SbomPackage::new("SPDXRef-A");
        let request = VulnerabilityRequest::package(
            OsvPackage::named("curl").unwrap(),
            Some("7.50.3".to_string()),
        );

        let mut collector = RequestCollector::default();
        assert!(collector.insert(request.clone(), None, &source));
        assert!(!collector.insert(request, None, &source));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_download_location_matching_reference_adds_nothing() {
        let package = SbomPackage::new("SPDXRef-cli")
            .with_name("@angular/cli")
            .with_external_ref("npm", "@angular/cli@13.1.2");
        let before = collect(&package, MavenNaming::ArtifactOnly).len();

        let package = package.with_download_location("https://www.npmjs.com/package/@angular/cli/v/13.1.2");
        let after = collect(&package, MavenNaming::ArtifactOnly).len();

        assert_eq!(before, after);
    }

    #[test]
    fn test_own_name_request_issued_alongside_references() {
        let package = SbomPackage::new("SPDXRef-curl")
            .with_name("curl")
            .with_version("7.50.3")
            .with_external_ref("purl", "pkg:deb/debian/curl@7.50.3-1");

        let collector = collect(&package, MavenNaming::ArtifactOnly);
        assert_eq!(collector.len(), 2);

        let own = &collector.requests()[0];
        let identity = own.package_identity().unwrap();
        assert_eq!(identity.name(), "curl");
        assert_eq!(identity.ecosystem(), None);
        assert_eq!(identity.purl(), None);
        assert_eq!(own.version(), Some("7.50.3"));
    }

    #[test]
    fn test_own_name_drops_version_suffix_but_keeps_scope() {
        let package = SbomPackage::new("SPDXRef-x")
            .with_name("@angular/cli@13.1.2")
            .with_version("13.1.2");
        let collector = collect(&package, MavenNaming::ArtifactOnly);
        assert_eq!(
            collector.requests()[0].package_identity().unwrap().name(),
            "@angular/cli"
        );
    }

    #[test]
    fn test_missing_version_completed_from_package() {
        let package = SbomPackage::new("SPDXRef-tools")
            .with_name("tools-java")
            .with_version("1.0.3")
            .with_download_location("https://github.com/spdx/tools-java");

        let collector = collect(&package, MavenNaming::ArtifactOnly);
        let github = collector
            .requests()
            .iter()
            .find(|r| r.package_identity().is_some_and(|p| p.name() == "github.com/spdx/tools-java"))
            .unwrap();
        assert_eq!(github.version(), Some("1.0.3"));
    }

    #[test]
    fn test_unresolvable_identity_dropped_with_diagnostic() {
        let package = SbomPackage::new("SPDXRef-tools")
            .with_download_location("https://github.com/spdx/tools-java");

        let collector = collect(&package, MavenNaming::ArtifactOnly);
        assert!(collector.is_empty());
        assert_eq!(collector.diagnostics().len(), 1);
        assert_eq!(collector.diagnostics()[0].kind, DiagnosticKind::UnresolvableIdentity);
    }

    #[test]
    fn test_pattern_mismatch_skips_reference_only() {
        let package = SbomPackage::new("SPDXRef-x")
            .with_external_ref("purl", "pkg:broken")
            .with_external_ref("npm", "tinymce@4.9.11");

        let collector = collect(&package, MavenNaming::ArtifactOnly);
        assert_eq!(collector.len(), 1);
        assert_eq!(collector.diagnostics().len(), 1);
        assert_eq!(collector.diagnostics()[0].kind, DiagnosticKind::PatternMismatch);
    }

    #[test]
    fn test_unknown_reference_types_ignored_silently() {
        let package = SbomPackage::new("SPDXRef-x").with_external_ref("advisory", "https://example.org");
        let collector = collect(&package, MavenNaming::ArtifactOnly);
        assert!(collector.is_empty());
        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_resolved_release_substituted() {
        let release = "22ece559cc7cc2364edc5e5593d63ae8bd229f9f";
        let revision = "309cf2674ee7a0749978cf8265ab91a60aea0f7d";
        let package = SbomPackage::new("SPDXRef-x").with_external_ref("swh", format!("swh:1:rel:{}", release));

        let mut collector = RequestCollector::new(MavenNaming::ArtifactOnly)
            .with_resolved_releases(HashMap::from([(release.to_string(), revision.to_string())]));
        collector.collect_package(&package);

        assert_eq!(collector.requests()[0].commit_id(), Some(revision));
    }

    #[test]
    fn test_release_identifiers_deduplicated() {
        let rel = "swh:1:rel:22ece559cc7cc2364edc5e5593d63ae8bd229f9f";
        let a = SbomPackage::new("SPDXRef-a")
            .with_external_ref("swh", rel)
            .with_external_ref("swh", "swh:1:rev:309cf2674ee7a0749978cf8265ab91a60aea0f7d");
        let b = SbomPackage::new("SPDXRef-b").with_external_ref("http://spdx.org/rdf/references/swh", rel);

        let releases = RequestCollector::release_identifiers([&a, &b]);
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].hash(), "22ece559cc7cc2364edc5e5593d63ae8bd229f9f");
    }
}
