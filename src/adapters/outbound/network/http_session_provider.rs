use super::component_registry_client::ComponentRegistryClient;
use super::incident_database_client::IncidentDatabaseClient;
use super::rest_session::{RestSession, SessionSettings};
use crate::ports::outbound::SessionProvider;
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;

/// Opens probed REST sessions to the configured services
///
/// Each call builds a new session and checks the service's health endpoint
/// before handing it out.
#[derive(Debug, Clone)]
pub struct HttpSessionProvider {
    registry_url: Option<String>,
    incident_db_url: Option<String>,
    settings: SessionSettings,
}

impl HttpSessionProvider {
    pub fn new(
        registry_url: Option<String>,
        incident_db_url: Option<String>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            registry_url,
            incident_db_url,
            settings,
        }
    }

    async fn open(
        &self,
        service: &'static str,
        url: Option<&str>,
        health_path: &str,
    ) -> Result<RestSession> {
        let url = url.ok_or_else(|| QueryError::ServiceUnavailable {
            service: service.to_string(),
            url: "(not configured)".to_string(),
            details: "no URL configured for this service".to_string(),
        })?;
        let session = RestSession::new(service, url, &self.settings)?;
        session.probe(health_path).await?;
        Ok(session)
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    type Registry = ComponentRegistryClient;
    type IncidentDb = IncidentDatabaseClient;

    fn registry_url(&self) -> Option<&str> {
        self.registry_url.as_deref()
    }

    async fn component_registry(&self) -> Result<ComponentRegistryClient> {
        let session = self
            .open(
                ComponentRegistryClient::SERVICE,
                self.registry_url.as_deref(),
                ComponentRegistryClient::HEALTH_PATH,
            )
            .await?;
        Ok(ComponentRegistryClient::new(session))
    }

    async fn incident_database(&self) -> Result<IncidentDatabaseClient> {
        let session = self
            .open(
                IncidentDatabaseClient::SERVICE,
                self.incident_db_url.as_deref(),
                IncidentDatabaseClient::HEALTH_PATH,
            )
            .await?;
        Ok(IncidentDatabaseClient::new(session))
    }
}
