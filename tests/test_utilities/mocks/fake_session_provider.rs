use super::fake_component_registry::REGISTRY_URL;
use super::{FakeComponentRegistry, FakeIncidentDatabase};
use async_trait::async_trait;
use prodsec_query::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Hands out clones of the given fakes and counts opened sessions
#[derive(Clone)]
pub struct FakeSessionProvider {
    registry: FakeComponentRegistry,
    incident_db: FakeIncidentDatabase,
    sessions_opened: Arc<AtomicUsize>,
}

impl FakeSessionProvider {
    pub fn new(registry: FakeComponentRegistry, incident_db: FakeIncidentDatabase) -> Self {
        Self {
            registry,
            incident_db,
            sessions_opened: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for FakeSessionProvider {
    type Registry = FakeComponentRegistry;
    type IncidentDb = FakeIncidentDatabase;

    fn registry_url(&self) -> Option<&str> {
        Some(REGISTRY_URL)
    }

    async fn component_registry(&self) -> Result<FakeComponentRegistry> {
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(self.registry.clone())
    }

    async fn incident_database(&self) -> Result<FakeIncidentDatabase> {
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(self.incident_db.clone())
    }
}
