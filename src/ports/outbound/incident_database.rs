use crate::query_engine::domain::{Affect, Conditions, Flaw, Tracker};
use crate::shared::Result;
use async_trait::async_trait;

/// IncidentDatabase port for read access to flaws, affects and trackers
///
/// Implementations must be `Send + Sync` to support concurrent access.
#[async_trait]
pub trait IncidentDatabase: Send + Sync {
    /// Base URL of the service, used to build provenance links
    fn base_url(&self) -> &str;

    /// Retrieves a flaw by uuid or CVE id
    ///
    /// # Errors
    /// Returns an error if the flaw does not exist or the request fails
    async fn retrieve_flaw(&self, id_or_cve: &str) -> Result<Flaw>;

    /// Lists flaws matching `conditions` (e.g. `state`, `impact`)
    async fn list_flaws(&self, conditions: &Conditions) -> Result<Vec<Flaw>>;

    /// Lists affects
    ///
    /// # Arguments
    /// * `flaw` - Restrict to the affects of one flaw (by uuid)
    /// * `conditions` - Filter fields such as `affectedness`, `resolution`, `impact`
    /// * `limit` - Largest number of affects returned
    async fn list_affects(
        &self,
        flaw: Option<&str>,
        conditions: &Conditions,
        limit: usize,
    ) -> Result<Vec<Affect>>;

    async fn retrieve_affect(&self, uuid: &str) -> Result<Affect>;

    async fn list_trackers(&self, conditions: &Conditions) -> Result<Vec<Tracker>>;

    async fn retrieve_tracker(&self, uuid: &str) -> Result<Tracker>;
}
