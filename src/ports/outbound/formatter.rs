use crate::application::dto::QueryOutput;
use crate::shared::Result;

/// ResultFormatter port for rendering normalized query results
///
/// This port abstracts the output layout (JSON, text lines, table).
pub trait ResultFormatter {
    /// Renders a query result
    ///
    /// # Arguments
    /// * `output` - The normalized result and the view it belongs to
    ///
    /// # Returns
    /// The rendered content, ready to be presented
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, output: &QueryOutput) -> Result<String>;
}
