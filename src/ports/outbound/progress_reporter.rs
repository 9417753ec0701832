/// ProgressReporter port for reporting progress during a conversion
///
/// This port abstracts user-facing progress output (e.g., to stderr),
/// kept apart from the structured log.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of the query fan-out
    ///
    /// # Arguments
    /// * `current` - Number of finished queries
    /// * `total` - Number of queries issued
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal problem
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
