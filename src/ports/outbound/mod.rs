/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod document_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod swh_release_lookup;
pub mod vulnerability_formatter;
pub mod vulnerability_query;

pub use document_reader::DocumentReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use swh_release_lookup::{SwhRelease, SwhReleaseLookup};
pub use vulnerability_formatter::VulnerabilityFormatter;
pub use vulnerability_query::VulnerabilityQuery;
