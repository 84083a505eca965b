/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into the use case and normalized
/// results from the use case to the formatters.
mod output_format;
mod query_output;
mod query_request;

pub use output_format::OutputFormat;
pub use query_output::{QueryOutput, ResultView};
pub use query_request::{QueryRequest, QueryTarget};
