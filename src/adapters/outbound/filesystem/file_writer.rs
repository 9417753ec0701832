use crate::ports::outbound::OutputPresenter;
use crate::shared::error::SpdxToOsvError;
use crate::shared::Result;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing the report to a new file
///
/// This adapter implements the OutputPresenter port for file output.
/// An existing file is never overwritten.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Fails early when the output cannot be created, so that no network
    /// work is wasted on a run whose result would be discarded.
    pub fn ensure_writable(&self) -> Result<()> {
        if fs::symlink_metadata(&self.output_path).is_ok() {
            return Err(SpdxToOsvError::OutputAlreadyExists {
                path: self.output_path.clone(),
            }
            .into());
        }
        self.validate_parent_directory()
    }

    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(SpdxToOsvError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_parent_directory()?;

        // create_new also refuses a file that appeared since ensure_writable
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.output_path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => SpdxToOsvError::OutputAlreadyExists {
                    path: self.output_path.clone(),
                },
                _ => SpdxToOsvError::FileWriteError {
                    path: self.output_path.clone(),
                    details: e.to_string(),
                },
            })?;

        file.write_all(content.as_bytes())
            .map_err(|e| SpdxToOsvError::FileWriteError {
                path: self.output_path.clone(),
                details: e.to_string(),
            })?;

        eprintln!("✅ Output complete: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
