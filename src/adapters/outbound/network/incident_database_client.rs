use super::rest_session::RestSession;
use crate::ports::outbound::IncidentDatabase;
use crate::query_engine::domain::{Affect, Conditions, Flaw, Page, Tracker};
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

const API: &str = "osidb/api/v1";

/// Incident database session over its REST API
#[derive(Debug, Clone)]
pub struct IncidentDatabaseClient {
    session: RestSession,
}

impl IncidentDatabaseClient {
    pub const SERVICE: &'static str = "incident-database";
    pub const HEALTH_PATH: &'static str = "osidb/healthy";

    pub fn new(session: RestSession) -> Self {
        Self { session }
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: Vec<(String, String)>,
    ) -> Result<Vec<T>> {
        let page: Page<T> = self
            .session
            .get_json(&format!("{}/{}", API, collection), &query)
            .await?;
        Ok(page.results)
    }

    async fn retrieve<T: DeserializeOwned>(
        &self,
        collection: &str,
        entity: &str,
        key: &str,
    ) -> Result<T> {
        let path = format!("{}/{}/{}", API, collection, urlencoding::encode(key));
        self.session
            .get_optional_json(&path, &[])
            .await?
            .ok_or_else(|| {
                QueryError::NotFound {
                    entity: entity.to_string(),
                    key: key.to_string(),
                }
                .into()
            })
    }
}

fn pairs(conditions: &Conditions) -> Vec<(String, String)> {
    conditions
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[async_trait]
impl IncidentDatabase for IncidentDatabaseClient {
    fn base_url(&self) -> &str {
        self.session.base_url()
    }

    async fn retrieve_flaw(&self, id_or_cve: &str) -> Result<Flaw> {
        self.retrieve("flaws", "flaw", id_or_cve).await
    }

    async fn list_flaws(&self, conditions: &Conditions) -> Result<Vec<Flaw>> {
        self.list("flaws", pairs(conditions)).await
    }

    async fn list_affects(
        &self,
        flaw: Option<&str>,
        conditions: &Conditions,
        limit: usize,
    ) -> Result<Vec<Affect>> {
        let mut query = pairs(conditions);
        if let Some(flaw) = flaw {
            query.push(("flaw".to_string(), flaw.to_string()));
        }
        query.push(("limit".to_string(), limit.to_string()));
        self.list("affects", query).await
    }

    async fn retrieve_affect(&self, uuid: &str) -> Result<Affect> {
        self.retrieve("affects", "affect", uuid).await
    }

    async fn list_trackers(&self, conditions: &Conditions) -> Result<Vec<Tracker>> {
        self.list("trackers", pairs(conditions)).await
    }

    async fn retrieve_tracker(&self, uuid: &str) -> Result<Tracker> {
        self.retrieve("trackers", "tracker", uuid).await
    }
}
