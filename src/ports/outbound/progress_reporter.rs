/// ProgressReporter port for user feedback while a query runs
///
/// Implementations write to stderr (or nowhere) so that stdout only ever
/// carries the result.
pub trait ProgressReporter {
    /// Starts an indeterminate progress indicator
    ///
    /// # Arguments
    /// * `message` - What is being waited for
    fn start(&self, message: &str);

    /// Replaces the message of the running indicator
    fn report(&self, message: &str);

    /// Stops and clears the indicator; calling it twice is harmless
    fn finish(&self);
}
