use super::EntityOperation;
use crate::application::dto::{QueryOutput, ResultView};
use crate::application::queries::product_stream_summary::resolve_product_stream;
use crate::application::queries::{ComponentListing, Query};
use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{Component, Conditions, ParameterSpec, QueryParameters};
use crate::query_engine::services::PaginatedFetcher;
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;

const DEFAULT_VIEW: &str = "summary";

const COMPONENT_LIST_CONDITIONS: &[(&str, &str)] = &[
    ("namespace", "namespace"),
    ("ofuri", "ofuri"),
    ("re_purl", "re_purl"),
    ("name", "name"),
    ("re_name", "re_name"),
    ("version", "version"),
    ("type", "type"),
    ("arch", "arch"),
    ("view", "view"),
];

const STREAM_CONDITIONS: &[(&str, &str)] = &[("ofuri", "ofuri"), ("name", "name")];

/// Component registry entities: components and product streams
pub struct RegistryEntities<R: ComponentRegistry> {
    registry: R,
    fetcher: PaginatedFetcher,
    operation: EntityOperation,
    params: QueryParameters,
}

impl<R: ComponentRegistry> RegistryEntities<R> {
    /// # Errors
    /// Returns an error if `operation` belongs to the incident database
    pub fn new(registry: R, operation: EntityOperation, params: QueryParameters) -> Result<Self> {
        if operation.service() != super::Service::ComponentRegistry {
            anyhow::bail!("{} is not a component registry operation", operation);
        }
        Ok(Self {
            registry,
            fetcher: PaginatedFetcher::default(),
            operation,
            params,
        })
    }

    pub fn with_fetcher(mut self, fetcher: PaginatedFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    async fn list_components(&self, mut conditions: Conditions) -> Result<Vec<Component>> {
        conditions
            .entry("view".to_string())
            .or_insert_with(|| DEFAULT_VIEW.to_string());
        let listing = ComponentListing::new(&self.registry, conditions);
        self.fetcher
            .fetch_all(&listing, |a, b| a.purl.cmp(&b.purl))
            .await
    }

    async fn component(&self, purl: &str) -> Result<Component> {
        Ok(self
            .registry
            .retrieve_component(purl)
            .await?
            .ok_or_else(|| QueryError::NotFound {
                entity: "component".to_string(),
                key: purl.to_string(),
            })?)
    }

    async fn latest_components(&self, spec: &ParameterSpec) -> Result<Vec<Component>> {
        let ofuri = match self.params.get("ofuri") {
            Some(ofuri) => ofuri.to_string(),
            None => {
                let name = self.params.require(spec, "name")?;
                let mut conditions = Conditions::new();
                conditions.insert("name".to_string(), name.to_string());
                resolve_product_stream(&self.registry, &conditions).await?.ofuri
            }
        };

        let mut conditions = self
            .params
            .conditions(&[("namespace", "namespace"), ("view", "view")]);
        conditions.insert("ofuri".to_string(), ofuri);
        self.list_components(conditions).await
    }
}

#[async_trait(?Send)]
impl<R: ComponentRegistry> Query for RegistryEntities<R> {
    fn spec(&self) -> ParameterSpec {
        self.operation.spec()
    }

    async fn run(&self) -> Result<QueryOutput> {
        let spec = self.operation.spec();
        self.operation.validate(&self.params)?;

        match self.operation {
            EntityOperation::ComponentsList => {
                let components = self
                    .list_components(self.params.conditions(COMPONENT_LIST_CONDITIONS))
                    .await?;
                QueryOutput::records(ResultView::ComponentList, &components)
            }
            EntityOperation::ComponentsGet => {
                let component = self.component(self.params.require(&spec, "purl")?).await?;
                QueryOutput::record(ResultView::Component, &component)
            }
            EntityOperation::ComponentsGetManifest => {
                let uuid = match self.params.get("uuid") {
                    Some(uuid) => uuid.to_string(),
                    None => {
                        let purl = self.params.require(&spec, "purl")?;
                        self.component(purl).await?.uuid.ok_or_else(|| {
                            QueryError::NotFound {
                                entity: "component uuid".to_string(),
                                key: purl.to_string(),
                            }
                        })?
                    }
                };
                let manifest = self.registry.retrieve_component_manifest(&uuid).await?;
                QueryOutput::record(ResultView::Manifest, &manifest)
            }
            EntityOperation::ProductStreamsList => {
                let mut streams = self
                    .registry
                    .list_product_streams(&self.params.conditions(&[("re_name", "re_name")]))
                    .await?;
                streams.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.ofuri.cmp(&b.ofuri)));
                QueryOutput::records(ResultView::ProductStreamList, &streams)
            }
            EntityOperation::ProductStreamsGet => {
                let stream = resolve_product_stream(
                    &self.registry,
                    &self.params.conditions(STREAM_CONDITIONS),
                )
                .await?;
                QueryOutput::record(ResultView::ProductStream, &stream)
            }
            EntityOperation::ProductStreamsGetManifest => {
                let stream = resolve_product_stream(
                    &self.registry,
                    &self.params.conditions(STREAM_CONDITIONS),
                )
                .await?;
                let uuid = stream.uuid.ok_or_else(|| QueryError::NotFound {
                    entity: "product stream uuid".to_string(),
                    key: stream.ofuri.clone(),
                })?;
                let manifest = self.registry.retrieve_product_stream_manifest(&uuid).await?;
                QueryOutput::record(ResultView::Manifest, &manifest)
            }
            EntityOperation::ProductStreamsGetLatestComponents => {
                let components = self.latest_components(&spec).await?;
                QueryOutput::records(ResultView::ComponentList, &components)
            }
            other => anyhow::bail!("{} is not a component registry operation", other),
        }
    }
}
