use super::Query;
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{ComponentRef, ParameterSpec, QueryParameters};
use crate::query_engine::services::filter_sources;
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const SPEC: ParameterSpec = ParameterSpec {
    name: "components-containing-specific-component",
    allowed: &["purl", "component_type", "component_name", "namespace"],
    required: &["purl"],
    needs_parameters: true,
};

/// A component and the sources it is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSources {
    pub link: String,
    /// Source type filter that was applied, if any
    #[serde(rename = "type")]
    pub component_type: Option<String>,
    pub name: String,
    pub purl: String,
    pub sources: Vec<ComponentRef>,
}

/// What is the artifact identified by a purl built from?
pub struct ComponentsContainingSpecificComponent<R: ComponentRegistry> {
    registry: R,
    params: QueryParameters,
}

impl<R: ComponentRegistry> ComponentsContainingSpecificComponent<R> {
    pub fn new(registry: R, params: QueryParameters) -> Self {
        Self { registry, params }
    }

    pub async fn execute(&self) -> Result<ComponentSources> {
        self.params.validate(&SPEC)?;
        let purl = self.params.require(&SPEC, "purl")?;
        let component_type = self.params.get("component_type");

        let component = self
            .registry
            .retrieve_component(purl)
            .await?
            .ok_or_else(|| QueryError::NotFound {
                entity: "component".to_string(),
                key: purl.to_string(),
            })?;

        Ok(ComponentSources {
            sources: filter_sources(&component.sources, component_type),
            link: component.link,
            component_type: component_type.map(str::to_string),
            name: component.name,
            purl: component.purl,
        })
    }
}

#[async_trait(?Send)]
impl<R: ComponentRegistry> Query for ComponentsContainingSpecificComponent<R> {
    fn spec(&self) -> ParameterSpec {
        SPEC
    }

    async fn run(&self) -> Result<QueryOutput> {
        let result = self.execute().await?;
        QueryOutput::record(ResultView::ComponentsContainComponent, &result)
    }
}
