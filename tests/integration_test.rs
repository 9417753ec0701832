/// Integration tests for the application layer
mod test_utilities;

use spdx_to_osv::prelude::*;
use std::path::PathBuf;
use test_utilities::fixtures_path;
use test_utilities::mocks::*;

const RELEASE: &str = "22ece559cc7cc2364edc5e5593d63ae8bd229f9f";
const REVISION: &str = "309cf2674ee7a0749978cf8265ab91a60aea0f7d";

fn fixture(name: &str) -> PathBuf {
    fixtures_path().join(name)
}

fn json_request() -> ConversionRequest {
    ConversionRequest::new(fixture("webapp.spdx.json"), InputFormat::Json)
}

#[tokio::test]
async fn test_convert_reachable_packages_from_json() {
    let query = MockVulnerabilityQuery::new()
        .with_vulnerability("jinja2", "GHSA-g3rq-g295-4j3m")
        .with_vulnerability("lodash", "GHSA-p6mc-m468-83gw")
        .with_vulnerability("pytest", "PYSEC-2022-42969");
    let progress_reporter = MockProgressReporter::new();

    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query.clone(),
        None::<MockSwhReleaseLookup>,
        progress_reporter.clone(),
    );

    let response = use_case.execute(json_request()).await.unwrap();

    // webapp, jinja2, lodash and libfoo; pytest is a dev dependency
    assert_eq!(response.relevant_package_count, 4);
    assert_eq!(response.request_count, 3);
    assert_eq!(response.failed_query_count, 0);
    assert_eq!(query.seen_keys(), vec![RELEASE, "jinja2", "lodash"]);

    let mut ids: Vec<&str> = response.vulnerabilities.iter().map(|v| v.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["GHSA-g3rq-g295-4j3m", "GHSA-p6mc-m468-83gw"]);

    let messages = progress_reporter.get_messages();
    assert!(messages.iter().any(|m| m.contains("Progress: 3/3")));
    assert!(progress_reporter.errors().is_empty());
}

#[tokio::test]
async fn test_yaml_document_gives_same_requests() {
    let query = MockVulnerabilityQuery::new();
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query.clone(),
        None::<MockSwhReleaseLookup>,
        MockProgressReporter::new(),
    );

    let request = ConversionRequest::new(fixture("webapp.spdx.yaml"), InputFormat::Yaml);
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.relevant_package_count, 4);
    assert_eq!(query.seen_keys(), vec![RELEASE, "jinja2", "lodash"]);
    assert!(!response.has_vulnerabilities());
}

#[tokio::test]
async fn test_all_packages_includes_dev_dependencies() {
    let query = MockVulnerabilityQuery::new().with_vulnerability("pytest", "PYSEC-2022-42969");
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query.clone(),
        None::<MockSwhReleaseLookup>,
        MockProgressReporter::new(),
    );

    let request = json_request().with_relevance_mode(RelevanceMode::AllPackages);
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.relevant_package_count, 5);
    assert_eq!(response.request_count, 4);
    assert!(query.seen_keys().contains(&"pytest".to_string()));
    assert_eq!(response.vulnerabilities.len(), 1);
    assert_eq!(response.vulnerabilities[0].id, "PYSEC-2022-42969");
}

#[tokio::test]
async fn test_failed_query_reported_and_others_kept() {
    let query = MockVulnerabilityQuery::new()
        .with_failure_for("lodash")
        .with_vulnerability("jinja2", "GHSA-g3rq-g295-4j3m");
    let progress_reporter = MockProgressReporter::new();
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query,
        None::<MockSwhReleaseLookup>,
        progress_reporter.clone(),
    );

    let response = use_case.execute(json_request()).await.unwrap();

    assert_eq!(response.failed_query_count, 1);
    assert_eq!(response.vulnerabilities.len(), 1);
    assert!(response
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::QueryFailed && d.message.contains("lodash")));
    assert_eq!(progress_reporter.errors().len(), 1);
}

#[tokio::test]
async fn test_release_resolution_queries_revision() {
    let query = MockVulnerabilityQuery::new();
    let lookup = MockSwhReleaseLookup::new().with_release(RELEASE, REVISION);
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query.clone(),
        Some(lookup.clone()),
        MockProgressReporter::new(),
    );

    let response = use_case
        .execute(json_request().with_resolve_swh_releases(true))
        .await
        .unwrap();

    assert_eq!(response.request_count, 3);
    assert_eq!(lookup.get_call_count(), 1);
    let keys = query.seen_keys();
    assert!(keys.contains(&REVISION.to_string()));
    assert!(!keys.contains(&RELEASE.to_string()));
}

#[tokio::test]
async fn test_cached_release_lookup_shared_across_documents() {
    let query = MockVulnerabilityQuery::new();
    let lookup = MockSwhReleaseLookup::new().with_release(RELEASE, REVISION);
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query.clone(),
        Some(CachingSwhReleaseLookup::new(lookup.clone())),
        MockProgressReporter::new(),
    );

    // Both documents reference the same release
    use_case
        .execute(json_request().with_resolve_swh_releases(true))
        .await
        .unwrap();
    let yaml_request = ConversionRequest::new(fixture("webapp.spdx.yaml"), InputFormat::Yaml)
        .with_resolve_swh_releases(true);
    use_case.execute(yaml_request).await.unwrap();

    assert_eq!(lookup.get_call_count(), 1);
    assert!(query.seen_keys().contains(&REVISION.to_string()));
}

#[tokio::test]
async fn test_unresolvable_release_falls_back_to_release_hash() {
    let query = MockVulnerabilityQuery::new();
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query.clone(),
        Some(MockSwhReleaseLookup::new()),
        MockProgressReporter::new(),
    );

    let response = use_case
        .execute(json_request().with_resolve_swh_releases(true))
        .await
        .unwrap();

    assert!(query.seen_keys().contains(&RELEASE.to_string()));
    assert_eq!(
        response
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::SwhLookupFailed)
            .count(),
        1
    );
}

#[tokio::test]
async fn test_document_without_root_fails() {
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        MockVulnerabilityQuery::new(),
        None::<MockSwhReleaseLookup>,
        MockProgressReporter::new(),
    );

    let request = ConversionRequest::new(fixture("no-root.spdx.json"), InputFormat::Json);
    let err = use_case.execute(request).await.unwrap_err();
    assert!(err.to_string().contains("no root element"));
}

#[tokio::test]
async fn test_document_reader_failure_is_fatal() {
    let query = MockVulnerabilityQuery::new();
    let use_case = ConvertSbomUseCase::new(
        MockDocumentReader::with_failure(),
        query.clone(),
        None::<MockSwhReleaseLookup>,
        MockProgressReporter::new(),
    );

    let result = use_case.execute(json_request()).await;
    assert!(result.is_err());
    assert!(query.seen_requests().is_empty());
}

#[tokio::test]
async fn test_duplicate_identities_queried_once() {
    let document = SbomDocument::new("SPDXRef-DOCUMENT")
        .with_package(
            SbomPackage::new("SPDXRef-A").with_external_ref("purl", "pkg:npm/lodash@4.17.15"),
        )
        .with_package(
            SbomPackage::new("SPDXRef-B").with_external_ref("purl", "pkg:npm/lodash@4.17.15"),
        )
        .with_root("SPDXRef-A")
        .with_root("SPDXRef-B");

    let query = MockVulnerabilityQuery::new().with_vulnerability("lodash", "GHSA-p6mc-m468-83gw");
    let use_case = ConvertSbomUseCase::new(
        MockDocumentReader::new(document),
        query.clone(),
        None::<MockSwhReleaseLookup>,
        MockProgressReporter::new(),
    );

    let response = use_case.execute(json_request()).await.unwrap();
    assert_eq!(response.request_count, 1);
    assert_eq!(query.seen_requests().len(), 1);
    assert_eq!(response.vulnerabilities.len(), 1);
}

#[tokio::test]
async fn test_output_deduplicates_records_shared_by_requests() {
    let query = MockVulnerabilityQuery::new()
        .with_vulnerability("jinja2", "GHSA-shared")
        .with_vulnerability("lodash", "GHSA-shared");
    let use_case = ConvertSbomUseCase::new(
        FileSystemReader::new(),
        query,
        None::<MockSwhReleaseLookup>,
        MockProgressReporter::new(),
    );

    let response = use_case.execute(json_request()).await.unwrap();
    assert_eq!(response.vulnerabilities.len(), 2);

    let output = JsonFormatter::new().format(&response.vulnerabilities).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "GHSA-shared");
}
