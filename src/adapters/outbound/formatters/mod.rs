/// Formatter adapters for the supported output formats
mod json_formatter;
mod purl_display;
mod table_formatter;
mod text_formatter;

pub use json_formatter::JsonFormatter;
pub use purl_display::PurlDisplay;
pub use table_formatter::TableFormatter;
pub use text_formatter::TextFormatter;
