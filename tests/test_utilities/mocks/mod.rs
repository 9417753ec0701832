/// Mock implementations for testing
mod mock_document_reader;
mod mock_progress_reporter;
mod mock_swh_release_lookup;
mod mock_vulnerability_query;

pub use mock_document_reader::MockDocumentReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_swh_release_lookup::MockSwhReleaseLookup;
pub use mock_vulnerability_query::MockVulnerabilityQuery;
