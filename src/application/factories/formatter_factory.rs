use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ResultFormatter;

/// Presentation switches that apply to the human-readable layouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatterOptions {
    /// Colorize text output
    pub color: bool,
    /// Print full purls instead of the condensed component display
    pub show_purl: bool,
}

/// Factory for creating result formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    /// * `options` - Color and purl display switches; JSON ignores them
    ///
    /// # Examples
    /// ```
    /// use prodsec_query::application::dto::OutputFormat;
    /// use prodsec_query::application::factories::{FormatterFactory, FormatterOptions};
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Table, FormatterOptions::default());
    /// ```
    pub fn create(format: OutputFormat, options: FormatterOptions) -> Box<dyn ResultFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Text => Box::new(TextFormatter::new(options.color, options.show_purl)),
            OutputFormat::Table => Box::new(TableFormatter::new(options.show_purl)),
        }
    }
}
