use crate::application::dto::QueryOutput;
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;

/// JsonFormatter adapter emitting the normalized result as pretty JSON
///
/// Object keys are emitted in sorted order, so unchanged results always
/// render to the same bytes.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, output: &QueryOutput) -> Result<String> {
        let mut json = output.to_json_pretty()?;
        json.push('\n');
        Ok(json)
    }
}
