use super::component_listing::{by_purl, ComponentListing};
use super::Query;
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{ParameterSpec, QueryParameters};
use crate::query_engine::services::PaginatedFetcher;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const SPEC: ParameterSpec = ParameterSpec {
    name: "products-containing-component",
    allowed: &["component_name", "namespace", "purl"],
    required: &["component_name"],
    needs_parameters: true,
};

const CONDITIONS: &[(&str, &str)] = &[("component_name", "name"), ("namespace", "namespace")];

/// One (product stream, component) pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ProductComponent {
    /// Product stream link
    pub link: String,
    pub ofuri: String,
    pub name: String,
    pub component_link: String,
    pub component_purl: String,
    pub component_root_components: Vec<String>,
    pub component_related_url: Option<String>,
}

/// Which product streams contain a component with a given name?
///
/// All matching components are downloaded with the paginated fetcher and
/// every product stream they belong to becomes a row.
pub struct ProductsContainingComponent<R: ComponentRegistry> {
    registry: R,
    fetcher: PaginatedFetcher,
    params: QueryParameters,
}

impl<R: ComponentRegistry> ProductsContainingComponent<R> {
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

    /// Rows ordered by product stream name, then component purl
    pub async fn execute(&self) -> Result<Vec<ProductComponent>> {
        self.params.validate(&SPEC)?;

        let listing = ComponentListing::new(&self.registry, self.params.conditions(CONDITIONS));
        let components = self.fetcher.fetch_all(&listing, by_purl).await?;

        let mut rows: Vec<ProductComponent> = components
            .iter()
            .flat_map(|component| {
                let mut root_components: Vec<String> = component
                    .root_components
                    .iter()
                    .map(|root| root.purl.clone())
                    .collect();
                root_components.sort();
                root_components.dedup();

                component.product_streams.iter().map(move |stream| ProductComponent {
                    link: stream.link.clone(),
                    ofuri: stream.ofuri.clone(),
                    name: stream.name.clone(),
                    component_link: component.link.clone(),
                    component_purl: component.purl.clone(),
                    component_root_components: root_components.clone(),
                    component_related_url: component.related_url.clone(),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.component_purl.cmp(&b.component_purl))
                .then_with(|| a.cmp(b))
        });
        rows.dedup();
        Ok(rows)
    }
}

#[async_trait(?Send)]
impl<R: ComponentRegistry> Query for ProductsContainingComponent<R> {
    fn spec(&self) -> ParameterSpec {
        SPEC
    }

    async fn run(&self) -> Result<QueryOutput> {
        let rows = self.execute().await?;
        QueryOutput::records(ResultView::ProductsContainComponent, &rows)
    }
}
