//! spdx-to-osv - vulnerability lookup for SPDX SBOMs
//!
//! This library reads an SPDX 2.x document, selects the packages that are
//! security-relevant for the element the document describes, derives OSV
//! queries from their identifiers, and collects the matching OSV records.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`osv_conversion`): identifier parsers, relevance
//!   traversal and request de-duplication; pure logic, no I/O
//! - **Application Layer** (`application`): the conversion use case and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common error types and the `Result` alias
//!
//! # Example
//!
//! ```no_run
//! use spdx_to_osv::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = ConvertSbomUseCase::new(
//!     FileSystemReader::new(),
//!     OsvClient::with_defaults()?,
//!     None::<SwhClient>,
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ConversionRequest::new(PathBuf::from("sbom.spdx.json"), InputFormat::Json);
//! let response = use_case.execute(request).await?;
//!
//! let output = JsonFormatter::new().format(&response.vulnerabilities)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod osv_conversion;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::JsonFormatter;
    pub use crate::adapters::outbound::network::{CachingSwhReleaseLookup, OsvClient, SwhClient};
    pub use crate::application::dto::{ConversionRequest, ConversionResponse, InputFormat};
    pub use crate::application::use_cases::ConvertSbomUseCase;
    pub use crate::osv_conversion::domain::{
        Diagnostic, DiagnosticKind, Ecosystem, OsvPackage, OsvVulnerability, SbomDocument,
        SbomPackage, VulnerabilityRequest,
    };
    pub use crate::osv_conversion::parsers::MavenNaming;
    pub use crate::osv_conversion::services::{RelevanceCollector, RelevanceMode, RequestCollector};
    pub use crate::ports::outbound::{
        DocumentReader, OutputPresenter, ProgressReporter, SwhReleaseLookup, VulnerabilityFormatter,
        VulnerabilityQuery,
    };
    pub use crate::shared::Result;
}
