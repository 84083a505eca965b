use super::{ComponentRegistry, IncidentDatabase};
use crate::shared::Result;
use async_trait::async_trait;

/// SessionProvider port for obtaining authenticated service sessions
///
/// Every call hands out a fresh session owned by the caller. Nothing is
/// pooled or kept in global state.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Registry: ComponentRegistry + 'static;
    type IncidentDb: IncidentDatabase + 'static;

    /// Configured component registry URL, if any
    ///
    /// Queries that only talk to the incident database still link into the
    /// registry.
    fn registry_url(&self) -> Option<&str>;

    /// Opens a session to the component registry
    ///
    /// # Errors
    /// Returns [`crate::shared::error::QueryError::ServiceUnavailable`] if the
    /// endpoint cannot be reached or rejects the credentials
    async fn component_registry(&self) -> Result<Self::Registry>;

    /// Opens a session to the incident database
    ///
    /// # Errors
    /// Returns [`crate::shared::error::QueryError::ServiceUnavailable`] if the
    /// endpoint cannot be reached or rejects the credentials
    async fn incident_database(&self) -> Result<Self::IncidentDb>;
}
