//! Query objects: one per cross-service question
//!
//! Every query validates its parameters against its own allow-list before
//! touching a session, builds fresh condition mappings and returns a typed
//! result that normalizes into a [`QueryOutput`].

mod component_listing;
pub mod components_affected_by_cve;
pub mod components_containing_component;
pub mod components_containing_specific_component;
pub mod product_stream_summary;
pub mod product_versions_affected_by_cve;
pub mod products_containing_component;
pub mod products_containing_specific_component;

pub use component_listing::ComponentListing;
pub use components_affected_by_cve::ComponentsAffectedByCve;
pub use components_containing_component::ComponentsContainingComponent;
pub use components_containing_specific_component::ComponentsContainingSpecificComponent;
pub use product_stream_summary::ProductStreamSummaryQuery;
pub use product_versions_affected_by_cve::ProductVersionsAffectedByCve;
pub use products_containing_component::ProductsContainingComponent;
pub use products_containing_specific_component::ProductsContainingSpecificComponent;

use crate::application::dto::QueryOutput;
use crate::query_engine::domain::{ParameterSpec, QueryParameters};
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;

/// Object-safe view of a query, used by the dispatcher
///
/// The futures are not required to be `Send`: queries run on the task that
/// awaits them and only their sub-requests fan out.
#[async_trait(?Send)]
pub trait Query {
    /// Parameters the query accepts
    fn spec(&self) -> ParameterSpec;

    /// Executes the query and normalizes its result
    async fn run(&self) -> Result<QueryOutput>;
}

/// The cross-service questions this client can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    ProductVersionsAffectedByCve,
    ProductsContainingSpecificComponent,
    ProductsContainingComponent,
    ProductStreamSummary,
    ComponentsContainingSpecificComponent,
    ComponentsContainingComponent,
    ComponentsAffectedByCve,
}

impl QueryKind {
    pub const ALL: [QueryKind; 7] = [
        QueryKind::ProductVersionsAffectedByCve,
        QueryKind::ProductsContainingSpecificComponent,
        QueryKind::ProductsContainingComponent,
        QueryKind::ProductStreamSummary,
        QueryKind::ComponentsContainingSpecificComponent,
        QueryKind::ComponentsContainingComponent,
        QueryKind::ComponentsAffectedByCve,
    ];

    pub fn spec(&self) -> ParameterSpec {
        match self {
            QueryKind::ProductVersionsAffectedByCve => product_versions_affected_by_cve::SPEC,
            QueryKind::ProductsContainingSpecificComponent => {
                products_containing_specific_component::SPEC
            }
            QueryKind::ProductsContainingComponent => products_containing_component::SPEC,
            QueryKind::ProductStreamSummary => product_stream_summary::SPEC,
            QueryKind::ComponentsContainingSpecificComponent => {
                components_containing_specific_component::SPEC
            }
            QueryKind::ComponentsContainingComponent => components_containing_component::SPEC,
            QueryKind::ComponentsAffectedByCve => components_affected_by_cve::SPEC,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Checks `params` without opening any session
    pub fn validate(&self, params: &QueryParameters) -> std::result::Result<(), QueryError> {
        params.validate(&self.spec())
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Joins a service base URL and an API path
pub(crate) fn api_link(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
