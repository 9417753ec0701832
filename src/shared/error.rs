use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the conversion ran to completion
    Success = 0,
    /// Vulnerabilities were found and `--fail-on-vulnerabilities` was requested
    VulnerabilitiesFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable document, missing root, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesFound => write!(f, "Vulnerabilities Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while decoding a single identifier string.
///
/// These never abort a run: the caller skips the offending reference and
/// records a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{kind} locator '{locator}' does not match the pattern '{pattern}'")]
    PatternMismatch {
        kind: &'static str,
        locator: String,
        pattern: String,
    },

    #[error("Package name must not be empty")]
    EmptyPackageName,
}

impl ParseError {
    pub fn mismatch(kind: &'static str, locator: &str, pattern: impl Into<String>) -> Self {
        ParseError::PatternMismatch {
            kind,
            locator: locator.to_string(),
            pattern: pattern.into(),
        }
    }
}

/// Application-specific errors for the SPDX to OSV conversion.
///
/// Uses thiserror to derive Display and Error traits, each variant carrying
/// a hint the CLI can show verbatim.
#[derive(Debug, Error)]
pub enum SpdxToOsvError {
    #[error("Input file not found: {path}\n\n💡 Hint: Please specify an existing SPDX document with --input")]
    InputNotFound { path: PathBuf },

    #[error("Output file already exists: {path}\n\n💡 Hint: Choose a new file name or remove the existing file first")]
    OutputAlreadyExists { path: PathBuf },

    #[error("Failed to parse SPDX document: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a valid SPDX {format} document")]
    DocumentParseError {
        path: PathBuf,
        format: String,
        details: String,
    },

    #[error("SPDX document has no root element\nDetails: {details}\n\n💡 Hint: The document must describe at least one element (documentDescribes or a DESCRIBES relationship), or use --all")]
    MissingDocumentRoot { details: String },

    #[error("Root element '{id}' is neither a package nor a file of the document\n\n💡 Hint: Check documentDescribes and DESCRIBES relationships, or use --all")]
    UnknownRootElement { id: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("OSV API error: {message}")]
    OsvApi { message: String },

    #[error("Software Heritage resource not found: {url}")]
    SwhNotFound { url: String },

    #[error("Software Heritage API error: {message}")]
    SwhApi { message: String },

    /// Validation error for builders and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },
}
