use crate::query_engine::domain::{
    Component, Conditions, Manifest, Page, PageWindow, ProductStream, ProductVersion,
};
use crate::shared::Result;
use async_trait::async_trait;

/// ComponentRegistry port for read access to the component registry
///
/// This port abstracts the registry's REST API: components, product streams,
/// product versions and their manifests. Responses are already decoded into
/// domain entities, whatever shape the service answered with.
///
/// # Async Support
/// Implementations must be `Send + Sync`; queries share one session by
/// reference across many concurrent calls.
#[async_trait]
pub trait ComponentRegistry: Send + Sync {
    /// Base URL of the service, used to build provenance links
    fn base_url(&self) -> &str;

    /// Counts the components matching `conditions` without downloading them
    async fn count_components(&self, conditions: &Conditions) -> Result<usize>;

    /// Lists one window of the components matching `conditions`
    ///
    /// # Arguments
    /// * `conditions` - Filter fields (e.g. `name`, `namespace`, `ofuri`)
    /// * `window` - Offset and limit of the requested page
    ///
    /// # Returns
    /// The page, including the total `count` reported by the service
    async fn list_components(
        &self,
        conditions: &Conditions,
        window: PageWindow,
    ) -> Result<Page<Component>>;

    /// Retrieves a single component by its purl
    ///
    /// # Returns
    /// `None` if the registry does not know the purl
    async fn retrieve_component(&self, purl: &str) -> Result<Option<Component>>;

    /// Retrieves the manifest of a component by uuid
    async fn retrieve_component_manifest(&self, uuid: &str) -> Result<Manifest>;

    /// Lists product streams matching `conditions` (e.g. `name`, `ofuri`, `re_name`)
    ///
    /// A lookup by unique key may be answered with a single object; it is
    /// returned as a one-element list.
    async fn list_product_streams(&self, conditions: &Conditions) -> Result<Vec<ProductStream>>;

    /// Retrieves the manifest of a product stream by uuid
    async fn retrieve_product_stream_manifest(&self, uuid: &str) -> Result<Manifest>;

    /// Lists product versions with the given name
    async fn list_product_versions(&self, name: &str) -> Result<Vec<ProductVersion>>;
}
