use super::component_listing::{by_purl, ComponentListing};
use super::Query;
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{ComponentRef, ParameterSpec, QueryParameters};
use crate::query_engine::services::{filter_sources, PaginatedFetcher};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const SPEC: ParameterSpec = ParameterSpec {
    name: "components-containing-component",
    allowed: &["component_name", "namespace", "component_type", "purl"],
    required: &["component_name"],
    needs_parameters: true,
};

const CONDITIONS: &[(&str, &str)] = &[("component_name", "name"), ("namespace", "namespace")];

/// Registry fields needed to build [`ComponentWithSources`]
const INCLUDE_FIELDS: &str = "link,name,purl,sources";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentWithSources {
    pub link: String,
    pub name: String,
    pub purl: String,
    pub sources: Vec<ComponentRef>,
}

/// Which components with a given name exist, and what are they built from?
///
/// The optional `component_type` narrows every component's sources on the
/// client side; the registry cannot filter sources by type.
pub struct ComponentsContainingComponent<R: ComponentRegistry> {
    registry: R,
    fetcher: PaginatedFetcher,
    params: QueryParameters,
}

impl<R: ComponentRegistry> ComponentsContainingComponent<R> {
    pub fn new(registry: R, params: QueryParameters) -> Self {
        Self {
            registry,
            fetcher: PaginatedFetcher::default(),
            params,
        }
    }

    pub fn with_fetcher(mut self, fetcher: PaginatedFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Components ordered by purl, each with purl-ordered sources
    pub async fn execute(&self) -> Result<Vec<ComponentWithSources>> {
        self.params.validate(&SPEC)?;
        let component_type = self.params.get("component_type");

        let mut conditions = self.params.conditions(CONDITIONS);
        conditions.insert("include_fields".to_string(), INCLUDE_FIELDS.to_string());

        let listing = ComponentListing::new(&self.registry, conditions);
        let mut components = self.fetcher.fetch_all(&listing, by_purl).await?;
        components.dedup_by(|a, b| a.purl == b.purl && a.link == b.link);

        Ok(components
            .into_iter()
            .map(|component| ComponentWithSources {
                sources: filter_sources(&component.sources, component_type),
                link: component.link,
                name: component.name,
                purl: component.purl,
            })
            .collect())
    }
}

#[async_trait(?Send)]
impl<R: ComponentRegistry> Query for ComponentsContainingComponent<R> {
    fn spec(&self) -> ParameterSpec {
        SPEC
    }

    async fn run(&self) -> Result<QueryOutput> {
        let components = self.execute().await?;
        QueryOutput::records(ResultView::ComponentsContainComponent, &components)
    }
}
