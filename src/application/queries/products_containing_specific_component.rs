use super::Query;
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{ParameterSpec, ProductRef, QueryParameters};
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;

pub const SPEC: ParameterSpec = ParameterSpec {
    name: "products-containing-specific-component",
    allowed: &["purl", "component_name", "namespace"],
    required: &["purl"],
    needs_parameters: true,
};

/// Which product streams contain the artifact identified by a purl?
pub struct ProductsContainingSpecificComponent<R: ComponentRegistry> {
    registry: R,
    params: QueryParameters,
}

impl<R: ComponentRegistry> ProductsContainingSpecificComponent<R> {
    pub fn new(registry: R, params: QueryParameters) -> Self {
        Self { registry, params }
    }

    /// Product stream references of the component, ordered by ofuri
    ///
    /// # Errors
    /// Returns [`QueryError::NotFound`] if the registry does not know the purl
    pub async fn execute(&self) -> Result<Vec<ProductRef>> {
        self.params.validate(&SPEC)?;
        let purl = self.params.require(&SPEC, "purl")?;

        let component = self
            .registry
            .retrieve_component(purl)
            .await?
            .ok_or_else(|| QueryError::NotFound {
                entity: "component".to_string(),
                key: purl.to_string(),
            })?;

        let mut streams = component.product_streams;
        streams.sort_by(|a, b| a.ofuri.cmp(&b.ofuri).then_with(|| a.cmp(b)));
        streams.dedup();
        Ok(streams)
    }
}

#[async_trait(?Send)]
impl<R: ComponentRegistry> Query for ProductsContainingSpecificComponent<R> {
    fn spec(&self) -> ParameterSpec {
        SPEC
    }

    async fn run(&self) -> Result<QueryOutput> {
        let streams = self.execute().await?;
        QueryOutput::records(ResultView::ProductsContainComponent, &streams)
    }
}
