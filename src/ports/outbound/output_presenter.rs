use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the formatted vulnerability report is written.
pub trait OutputPresenter {
    /// Presents the formatted report to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - The output file already exists
    /// - Writing to the output destination fails
    fn present(&self, content: &str) -> Result<()>;
}
