use crate::application::dto::{ConversionRequest, ConversionResponse};
use crate::osv_conversion::domain::{
    Diagnostic, DiagnosticKind, OsvVulnerability, SbomDocument, SbomPackage, VulnerabilityRequest,
};
use crate::osv_conversion::parsers::SwhIdentifier;
use crate::osv_conversion::services::{RelevanceCollector, RequestCollector};
use crate::ports::outbound::{DocumentReader, ProgressReporter, SwhReleaseLookup, VulnerabilityQuery};
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::pin::pin;

/// Type alias for resolved release map with the diagnostics of failed lookups
type ResolvedReleases = (HashMap<String, String>, Vec<Diagnostic>);

/// ConvertSbomUseCase - Core use case turning an SPDX document into OSV records
///
/// This use case orchestrates the conversion workflow using generic
/// dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `DR` - DocumentReader implementation
/// * `VQ` - VulnerabilityQuery implementation
/// * `SL` - SwhReleaseLookup implementation (optional)
/// * `PR` - ProgressReporter implementation
pub struct ConvertSbomUseCase<DR, VQ, SL, PR> {
    document_reader: DR,
    vulnerability_query: VQ,
    swh_lookup: Option<SL>,
    progress_reporter: PR,
}

impl<DR, VQ, SL, PR> ConvertSbomUseCase<DR, VQ, SL, PR>
where
    DR: DocumentReader,
    VQ: VulnerabilityQuery,
    SL: SwhReleaseLookup,
    PR: ProgressReporter,
{
    /// Creates a new ConvertSbomUseCase with injected dependencies
    pub fn new(
        document_reader: DR,
        vulnerability_query: VQ,
        swh_lookup: Option<SL>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            document_reader,
            vulnerability_query,
            swh_lookup,
            progress_reporter,
        }
    }

    /// Executes the conversion use case
    ///
    /// # Arguments
    /// * `request` - Conversion request with the input document and options
    ///
    /// # Returns
    /// ConversionResponse with every vulnerability found and the diagnostics
    /// of the run
    ///
    /// # Errors
    /// Returns an error if the request is invalid, the document cannot be
    /// read, or its root elements cannot be traversed. Failures of single
    /// queries are recorded as diagnostics instead.
    pub async fn execute(&self, request: ConversionRequest) -> Result<ConversionResponse> {
        // Step 1: Validate tunables
        request.validate()?;

        // Step 2: Read the SPDX document
        let document = self.read_and_report_document(&request)?;

        // Step 3: Select the security-relevant packages
        let relevant = self.collect_relevant_packages(&document, &request)?;

        // Step 4: Resolve Software Heritage releases if requested
        let (resolved_releases, mut diagnostics) =
            self.resolve_releases_if_requested(&request, &relevant).await;

        // Step 5: Derive the de-duplicated request set
        let mut collector = RequestCollector::new(request.maven_naming)
            .with_resolved_releases(resolved_releases);
        for package in &relevant {
            collector.collect_package(package);
        }
        let (requests, collector_diagnostics) = collector.into_parts();
        diagnostics.extend(collector_diagnostics);

        // Step 6: Fan the requests out to the vulnerability service
        let (vulnerabilities, query_diagnostics) = self
            .query_vulnerabilities(&requests, request.max_concurrent_queries)
            .await;
        let failed_query_count = query_diagnostics.len();
        diagnostics.extend(query_diagnostics);

        // Step 7: Report and build the response
        self.report_outcome(&vulnerabilities, requests.len(), failed_query_count);

        Ok(ConversionResponse {
            vulnerabilities,
            relevant_package_count: relevant.len(),
            request_count: requests.len(),
            failed_query_count,
            diagnostics,
        })
    }

    /// Reads the document, reporting what was found
    fn read_and_report_document(&self, request: &ConversionRequest) -> Result<SbomDocument> {
        self.progress_reporter.report(&format!(
            "📖 Loading SPDX {} document from: {}",
            request.input_format,
            request.input_path.display()
        ));

        let document = self
            .document_reader
            .read_document(&request.input_path, request.input_format)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} package(s) and {} relationship(s)",
            document.packages().len(),
            document.relationships().len()
        ));

        Ok(document)
    }

    fn collect_relevant_packages<'d>(
        &self,
        document: &'d SbomDocument,
        request: &ConversionRequest,
    ) -> Result<Vec<&'d SbomPackage>> {
        let relevant = RelevanceCollector::collect(document, request.relevance_mode)?;

        tracing::info!(
            mode = ?request.relevance_mode,
            relevant = relevant.len(),
            total = document.packages().len(),
            "relevant packages selected"
        );
        self.progress_reporter.report(&format!(
            "🔗 {} of {} package(s) are security-relevant",
            relevant.len(),
            document.packages().len()
        ));

        Ok(relevant)
    }

    /// Looks up every `swh:1:rel:` identifier of the relevant packages
    ///
    /// # Returns
    /// Release hash -> revision hash for each release that targets a
    /// revision, plus one diagnostic per failed lookup
    async fn resolve_releases_if_requested(
        &self,
        request: &ConversionRequest,
        relevant: &[&SbomPackage],
    ) -> ResolvedReleases {
        if !request.resolve_swh_releases {
            return (HashMap::new(), Vec::new());
        }
        let Some(lookup) = &self.swh_lookup else {
            tracing::debug!("release resolution requested without a Software Heritage client");
            return (HashMap::new(), Vec::new());
        };

        let releases = RequestCollector::release_identifiers(relevant.iter().copied());
        if releases.is_empty() {
            return (HashMap::new(), Vec::new());
        }

        self.progress_reporter.report(&format!(
            "🏷️  Resolving {} Software Heritage release(s)...",
            releases.len()
        ));

        let results: Vec<(SwhIdentifier, Result<_>)> = stream::iter(releases)
            .map(|release| async move {
                let result = lookup.fetch_release(release.hash()).await;
                (release, result)
            })
            .buffer_unordered(request.max_concurrent_queries)
            .collect()
            .await;

        let mut resolved = HashMap::new();
        let mut diagnostics = Vec::new();
        for (release, result) in results {
            match result {
                Ok(found) => match found.target_revision() {
                    Some(revision) => {
                        tracing::debug!(release = %release, revision, "release resolved");
                        resolved.insert(release.hash().to_string(), revision.to_string());
                    }
                    None => tracing::debug!(
                        release = %release,
                        target_type = %found.target_type,
                        "release does not target a revision, keeping release hash"
                    ),
                },
                Err(e) => {
                    let message = format!("{}: lookup failed, keeping release hash: {:#}", release, e);
                    tracing::warn!(kind = %DiagnosticKind::SwhLookupFailed, "{}", message);
                    diagnostics.push(Diagnostic::new(DiagnosticKind::SwhLookupFailed, message));
                }
            }
        }

        (resolved, diagnostics)
    }

    /// Issues every request with at most `max_concurrent` in flight
    ///
    /// A failed request contributes nothing but a `QueryFailed` diagnostic;
    /// the others proceed.
    async fn query_vulnerabilities(
        &self,
        requests: &[VulnerabilityRequest],
        max_concurrent: usize,
    ) -> (Vec<OsvVulnerability>, Vec<Diagnostic>) {
        let total = requests.len();
        self.progress_reporter
            .report(&format!("🔐 Querying OSV for {} request(s)...", total));

        let mut vulnerabilities = Vec::new();
        let mut diagnostics = Vec::new();
        let mut finished = 0;

        let mut results = pin!(stream::iter(requests)
            .map(|request| async move {
                let result = self.vulnerability_query.query(request).await;
                (request, result)
            })
            .buffer_unordered(max_concurrent));

        while let Some((request, result)) = results.next().await {
            finished += 1;
            match result {
                Ok(found) => {
                    if !found.is_empty() {
                        tracing::debug!(request = %request, count = found.len(), "vulnerabilities found");
                    }
                    vulnerabilities.extend(found);
                }
                Err(e) => {
                    let message = format!("query for {} failed: {:#}", request, e);
                    tracing::warn!(kind = %DiagnosticKind::QueryFailed, "{}", message);
                    diagnostics.push(Diagnostic::new(DiagnosticKind::QueryFailed, message));
                }
            }
            self.progress_reporter
                .report_progress(finished, total, Some("Querying OSV..."));
        }

        (vulnerabilities, diagnostics)
    }

    fn report_outcome(&self, vulnerabilities: &[OsvVulnerability], requests: usize, failed: usize) {
        if failed > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} of {} quer(ies) failed; run with --verbose for details",
                failed, requests
            ));
        }

        if vulnerabilities.is_empty() {
            self.progress_reporter
                .report_completion("✅ Vulnerability lookup complete: No known vulnerabilities found");
        } else {
            self.progress_reporter.report_completion(&format!(
                "✅ Vulnerability lookup complete: {} record(s) from {} request(s)",
                vulnerabilities.len(),
                requests
            ));
        }
    }
}
