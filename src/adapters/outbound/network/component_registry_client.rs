use super::rest_session::RestSession;
use super::wire::{Count, OneOrPage};
use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{
    Component, Conditions, Manifest, Page, PageWindow, ProductStream, ProductVersion,
};
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;

const API: &str = "api/v1";

/// Component registry session over its REST API
#[derive(Debug, Clone)]
pub struct ComponentRegistryClient {
    session: RestSession,
}

impl ComponentRegistryClient {
    pub const SERVICE: &'static str = "component-registry";
    pub const HEALTH_PATH: &'static str = "api/healthy";

    pub fn new(session: RestSession) -> Self {
        Self { session }
    }

    fn query(conditions: &Conditions) -> Vec<(String, String)> {
        conditions
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[async_trait]
impl ComponentRegistry for ComponentRegistryClient {
    fn base_url(&self) -> &str {
        self.session.base_url()
    }

    async fn count_components(&self, conditions: &Conditions) -> Result<usize> {
        let mut query = Self::query(conditions);
        query.push(("limit".to_string(), "1".to_string()));
        let answer: Count = self
            .session
            .get_json(&format!("{}/components", API), &query)
            .await?;
        Ok(answer.count)
    }

    async fn list_components(
        &self,
        conditions: &Conditions,
        window: PageWindow,
    ) -> Result<Page<Component>> {
        let mut query = Self::query(conditions);
        query.push(("offset".to_string(), window.offset.to_string()));
        query.push(("limit".to_string(), window.limit.to_string()));
        self.session
            .get_json(&format!("{}/components", API), &query)
            .await
    }

    async fn retrieve_component(&self, purl: &str) -> Result<Option<Component>> {
        let query = [("purl".to_string(), purl.to_string())];
        let found: Option<OneOrPage<Component>> = self
            .session
            .get_optional_json(&format!("{}/components", API), &query)
            .await?;
        Ok(found.and_then(|found| found.into_vec().into_iter().next()))
    }

    async fn retrieve_component_manifest(&self, uuid: &str) -> Result<Manifest> {
        let path = format!("{}/components/{}/manifest", API, urlencoding::encode(uuid));
        self.session
            .get_optional_json(&path, &[])
            .await?
            .ok_or_else(|| {
                QueryError::NotFound {
                    entity: "component manifest".to_string(),
                    key: uuid.to_string(),
                }
                .into()
            })
    }

    async fn list_product_streams(&self, conditions: &Conditions) -> Result<Vec<ProductStream>> {
        let found: Option<OneOrPage<ProductStream>> = self
            .session
            .get_optional_json(&format!("{}/product_streams", API), &Self::query(conditions))
            .await?;
        Ok(found.map(OneOrPage::into_vec).unwrap_or_default())
    }

    async fn retrieve_product_stream_manifest(&self, uuid: &str) -> Result<Manifest> {
        let path = format!(
            "{}/product_streams/{}/manifest",
            API,
            urlencoding::encode(uuid)
        );
        self.session
            .get_optional_json(&path, &[])
            .await?
            .ok_or_else(|| {
                QueryError::NotFound {
                    entity: "product stream manifest".to_string(),
                    key: uuid.to_string(),
                }
                .into()
            })
    }

    async fn list_product_versions(&self, name: &str) -> Result<Vec<ProductVersion>> {
        let query = [("name".to_string(), name.to_string())];
        let found: Option<OneOrPage<ProductVersion>> = self
            .session
            .get_optional_json(&format!("{}/product_versions", API), &query)
            .await?;
        Ok(found.map(OneOrPage::into_vec).unwrap_or_default())
    }
}
