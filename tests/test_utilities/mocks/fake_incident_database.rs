use async_trait::async_trait;
use prodsec_query::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const INCIDENT_DB_URL: &str = "https://osidb.example.com";

#[derive(Default)]
struct State {
    flaws: Vec<Flaw>,
    affects: Vec<Affect>,
    trackers: Vec<Tracker>,
    calls: AtomicUsize,
    conditions: Mutex<Vec<Conditions>>,
}

/// In-memory incident database that counts and records every call
#[derive(Clone, Default)]
pub struct FakeIncidentDatabase {
    state: Arc<State>,
}

impl FakeIncidentDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn configure(mut self, apply: impl FnOnce(&mut State)) -> Self {
        let state = Arc::get_mut(&mut self.state).expect("configure before cloning the fake");
        apply(state);
        self
    }

    pub fn with_flaw(self, flaw: Flaw) -> Self {
        self.configure(|s| s.flaws.push(flaw))
    }

    /// Stores an affect; `affect.flaw` links it to a flaw uuid
    pub fn with_affect(self, affect: Affect) -> Self {
        self.configure(|s| s.affects.push(affect))
    }

    pub fn with_tracker(self, tracker: Tracker) -> Self {
        self.configure(|s| s.trackers.push(tracker))
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_conditions(&self) -> Vec<Conditions> {
        self.state.conditions.lock().unwrap().clone()
    }

    fn record(&self, conditions: &Conditions) {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.state.conditions.lock().unwrap().push(conditions.clone());
    }

    fn not_found(entity: &str, key: &str) -> anyhow::Error {
        QueryError::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl IncidentDatabase for FakeIncidentDatabase {
    fn base_url(&self) -> &str {
        INCIDENT_DB_URL
    }

    async fn retrieve_flaw(&self, id_or_cve: &str) -> Result<Flaw> {
        self.record(&Conditions::from([("id".to_string(), id_or_cve.to_string())]));
        self.state
            .flaws
            .iter()
            .find(|f| f.uuid == id_or_cve || f.cve_id.as_deref() == Some(id_or_cve))
            .cloned()
            .ok_or_else(|| Self::not_found("flaw", id_or_cve))
    }

    async fn list_flaws(&self, conditions: &Conditions) -> Result<Vec<Flaw>> {
        self.record(conditions);
        Ok(self
            .state
            .flaws
            .iter()
            .filter(|f| {
                conditions
                    .get("impact")
                    .map_or(true, |i| f.impact.as_deref() == Some(i.as_str()))
            })
            .cloned()
            .collect())
    }

    async fn list_affects(
        &self,
        flaw: Option<&str>,
        conditions: &Conditions,
        limit: usize,
    ) -> Result<Vec<Affect>> {
        self.record(conditions);
        Ok(self
            .state
            .affects
            .iter()
            .filter(|a| flaw.map_or(true, |uuid| a.flaw.as_deref() == Some(uuid)))
            .filter(|a| {
                conditions
                    .get("affectedness")
                    .map_or(true, |v| a.affectedness.as_deref() == Some(v.as_str()))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn retrieve_affect(&self, uuid: &str) -> Result<Affect> {
        self.record(&Conditions::from([("uuid".to_string(), uuid.to_string())]));
        self.state
            .affects
            .iter()
            .find(|a| a.uuid == uuid)
            .cloned()
            .ok_or_else(|| Self::not_found("affect", uuid))
    }

    async fn list_trackers(&self, conditions: &Conditions) -> Result<Vec<Tracker>> {
        self.record(conditions);
        Ok(self.state.trackers.clone())
    }

    async fn retrieve_tracker(&self, uuid: &str) -> Result<Tracker> {
        self.record(&Conditions::from([("uuid".to_string(), uuid.to_string())]));
        self.state
            .trackers
            .iter()
            .find(|t| t.uuid == uuid)
            .cloned()
            .ok_or_else(|| Self::not_found("tracker", uuid))
    }
}
