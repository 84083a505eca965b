/// Output format enumeration for query results
///
/// Shared by the CLI (which parses it), the configuration file and the
/// formatter factory (which selects the adapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the normalized result (default)
    #[default]
    Json,
    /// Human-readable line output
    Text,
    /// Markdown-style table
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'text' or 'table'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}
