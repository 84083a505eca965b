use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{Component, Conditions, PageWindow};
use crate::query_engine::services::PagedCollection;
use crate::shared::Result;
use async_trait::async_trait;

/// Registry component list with fixed conditions, as a paginated collection
pub struct ComponentListing<'a, R: ComponentRegistry + ?Sized> {
    registry: &'a R,
    conditions: Conditions,
}

impl<'a, R: ComponentRegistry + ?Sized> ComponentListing<'a, R> {
    pub fn new(registry: &'a R, conditions: Conditions) -> Self {
        Self {
            registry,
            conditions,
        }
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }
}

#[async_trait]
impl<R: ComponentRegistry + ?Sized> PagedCollection for ComponentListing<'_, R> {
    type Item = Component;

    fn describe(&self) -> String {
        let filters: Vec<String> = self
            .conditions
            .iter()
            .map(|(field, value)| format!("{}={}", field, value))
            .collect();
        format!("components {}", filters.join(" "))
    }

    async fn count(&self) -> Result<usize> {
        self.registry.count_components(&self.conditions).await
    }

    async fn page(&self, window: PageWindow) -> Result<Vec<Component>> {
        Ok(self
            .registry
            .list_components(&self.conditions, window)
            .await?
            .results)
    }
}

/// Purl order used for every component listing
pub(crate) fn by_purl(a: &Component, b: &Component) -> std::cmp::Ordering {
    a.purl.cmp(&b.purl).then_with(|| a.link.cmp(&b.link))
}
