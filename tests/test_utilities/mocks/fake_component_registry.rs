use async_trait::async_trait;
use prodsec_query::prelude::*;
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const REGISTRY_URL: &str = "https://registry.example.com";

#[derive(Default)]
struct State {
    components: Vec<Component>,
    product_streams: Vec<ProductStream>,
    product_versions: Vec<ProductVersion>,
    reported_count: Option<usize>,
    failing_offsets: HashSet<usize>,
    failing_ofuris: HashSet<String>,
    calls: AtomicUsize,
    conditions: Mutex<Vec<Conditions>>,
    windows: Mutex<Vec<PageWindow>>,
}

/// In-memory component registry that counts and records every call
///
/// Clones share state, so a test can keep one handle while the query owns another.
#[derive(Clone, Default)]
pub struct FakeComponentRegistry {
    state: Arc<State>,
}

impl FakeComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn configure(mut self, apply: impl FnOnce(&mut State)) -> Self {
        let state = Arc::get_mut(&mut self.state).expect("configure before cloning the fake");
        apply(state);
        self
    }

    pub fn with_component(self, component: Component) -> Self {
        self.configure(|s| s.components.push(component))
    }

    pub fn with_product_stream(self, stream: ProductStream) -> Self {
        self.configure(|s| s.product_streams.push(stream))
    }

    pub fn with_product_version(self, version: ProductVersion) -> Self {
        self.configure(|s| s.product_versions.push(version))
    }

    /// Reports `count` matches regardless of the stored components
    pub fn reporting_count(self, count: usize) -> Self {
        self.configure(|s| s.reported_count = Some(count))
    }

    pub fn failing_window(self, offset: usize) -> Self {
        self.configure(|s| {
            s.failing_offsets.insert(offset);
        })
    }

    /// Every component listing restricted to `ofuri` fails
    pub fn failing_ofuri(self, ofuri: &str) -> Self {
        self.configure(|s| {
            s.failing_ofuris.insert(ofuri.to_string());
        })
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_conditions(&self) -> Vec<Conditions> {
        self.state.conditions.lock().unwrap().clone()
    }

    pub fn requested_windows(&self) -> Vec<PageWindow> {
        let mut windows = self.state.windows.lock().unwrap().clone();
        windows.sort();
        windows
    }

    fn record(&self, conditions: &Conditions) {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.state.conditions.lock().unwrap().push(conditions.clone());
    }

    fn matching(&self, conditions: &Conditions) -> Vec<Component> {
        self.state
            .components
            .iter()
            .filter(|c| conditions.get("name").map_or(true, |n| &c.name == n))
            .filter(|c| {
                conditions
                    .get("namespace")
                    .map_or(true, |n| c.namespace.as_deref() == Some(n.as_str()))
            })
            .filter(|c| {
                conditions
                    .get("type")
                    .map_or(true, |t| c.component_type.as_deref() == Some(t.as_str()))
            })
            .filter(|c| {
                conditions
                    .get("ofuri")
                    .map_or(true, |o| c.product_streams.iter().any(|ps| &ps.ofuri == o))
            })
            .cloned()
            .collect()
    }

    fn check_ofuri(&self, conditions: &Conditions) -> Result<()> {
        if let Some(ofuri) = conditions.get("ofuri") {
            if self.state.failing_ofuris.contains(ofuri) {
                anyhow::bail!("503 Service Unavailable for {}", ofuri);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ComponentRegistry for FakeComponentRegistry {
    fn base_url(&self) -> &str {
        REGISTRY_URL
    }

    async fn count_components(&self, conditions: &Conditions) -> Result<usize> {
        self.record(conditions);
        self.check_ofuri(conditions)?;
        Ok(self
            .state
            .reported_count
            .unwrap_or_else(|| self.matching(conditions).len()))
    }

    async fn list_components(
        &self,
        conditions: &Conditions,
        window: PageWindow,
    ) -> Result<Page<Component>> {
        self.record(conditions);
        self.state.windows.lock().unwrap().push(window);
        self.check_ofuri(conditions)?;
        if self.state.failing_offsets.contains(&window.offset) {
            anyhow::bail!("502 Bad Gateway at offset {}", window.offset);
        }

        let matching = self.matching(conditions);
        let count = matching.len();
        let results = matching
            .into_iter()
            .skip(window.offset)
            .take(window.limit)
            .collect();
        Ok(Page::new(count, results))
    }

    async fn retrieve_component(&self, purl: &str) -> Result<Option<Component>> {
        self.record(&Conditions::from([("purl".to_string(), purl.to_string())]));
        Ok(self
            .state
            .components
            .iter()
            .find(|c| c.purl == purl)
            .cloned())
    }

    async fn retrieve_component_manifest(&self, uuid: &str) -> Result<Manifest> {
        self.record(&Conditions::from([("uuid".to_string(), uuid.to_string())]));
        Ok(json!({"packages": [{"SPDXID": uuid}]}))
    }

    async fn list_product_streams(&self, conditions: &Conditions) -> Result<Vec<ProductStream>> {
        self.record(conditions);
        Ok(self
            .state
            .product_streams
            .iter()
            .filter(|s| conditions.get("name").map_or(true, |n| &s.name == n))
            .filter(|s| conditions.get("ofuri").map_or(true, |o| &s.ofuri == o))
            .cloned()
            .collect())
    }

    async fn retrieve_product_stream_manifest(&self, uuid: &str) -> Result<Manifest> {
        self.record(&Conditions::from([("uuid".to_string(), uuid.to_string())]));
        Ok(json!({"packages": []}))
    }

    async fn list_product_versions(&self, name: &str) -> Result<Vec<ProductVersion>> {
        self.record(&Conditions::from([("name".to_string(), name.to_string())]));
        Ok(self
            .state
            .product_versions
            .iter()
            .filter(|v| v.name == name)
            .cloned()
            .collect())
    }
}
