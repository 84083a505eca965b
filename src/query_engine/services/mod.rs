/// Stateless services shared by every query: concurrent fan-out,
/// paginated retrieval and client-side source filtering
pub mod fan_out;
pub mod paginated_fetcher;
pub mod source_filter;

pub use fan_out::fan_out;
pub use paginated_fetcher::{PagedCollection, PaginatedFetcher};
pub use source_filter::filter_sources;
