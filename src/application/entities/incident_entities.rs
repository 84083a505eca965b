use super::{EntityOperation, Service};
use crate::application::dto::{QueryOutput, ResultView};
use crate::application::queries::Query;
use crate::ports::outbound::IncidentDatabase;
use crate::query_engine::domain::{ParameterSpec, QueryParameters};
use crate::shared::Result;
use async_trait::async_trait;

/// Largest number of affects returned by `affects list`
pub const AFFECT_LIST_LIMIT: usize = 1000;

const FLAW_CONDITIONS: &[(&str, &str)] = &[
    ("state", "state"),
    ("resolution", "resolution"),
    ("impact", "impact"),
];

const AFFECT_CONDITIONS: &[(&str, &str)] = &[
    ("ps_module", "ps_module"),
    ("ps_component", "ps_component"),
    ("affectedness", "affectedness"),
    ("resolution", "resolution"),
    ("impact", "impact"),
];

/// Incident database entities: flaws, affects and trackers
pub struct IncidentEntities<D: IncidentDatabase> {
    incident_db: D,
    operation: EntityOperation,
    params: QueryParameters,
}

impl<D: IncidentDatabase> IncidentEntities<D> {
    /// # Errors
    /// Returns an error if `operation` belongs to the component registry
    pub fn new(incident_db: D, operation: EntityOperation, params: QueryParameters) -> Result<Self> {
        if operation.service() != Service::IncidentDatabase {
            anyhow::bail!("{} is not an incident database operation", operation);
        }
        Ok(Self {
            incident_db,
            operation,
            params,
        })
    }
}

#[async_trait(?Send)]
impl<D: IncidentDatabase> Query for IncidentEntities<D> {
    fn spec(&self) -> ParameterSpec {
        self.operation.spec()
    }

    async fn run(&self) -> Result<QueryOutput> {
        let spec = self.operation.spec();
        self.operation.validate(&self.params)?;

        match self.operation {
            EntityOperation::FlawsList => {
                let mut flaws = self
                    .incident_db
                    .list_flaws(&self.params.conditions(FLAW_CONDITIONS))
                    .await?;
                flaws.sort_by(|a, b| a.identifier().cmp(b.identifier()));
                QueryOutput::records(ResultView::FlawList, &flaws)
            }
            EntityOperation::FlawsGet => {
                let key = match self.params.get("uuid") {
                    Some(uuid) => uuid,
                    None => self.params.require(&spec, "cve_id")?,
                };
                let flaw = self.incident_db.retrieve_flaw(key).await?;
                QueryOutput::record(ResultView::Flaw, &flaw)
            }
            EntityOperation::AffectsList => {
                let mut affects = self
                    .incident_db
                    .list_affects(
                        None,
                        &self.params.conditions(AFFECT_CONDITIONS),
                        AFFECT_LIST_LIMIT,
                    )
                    .await?;
                affects.sort_by(|a, b| {
                    (&a.ps_module, &a.ps_component, &a.uuid).cmp(&(
                        &b.ps_module,
                        &b.ps_component,
                        &b.uuid,
                    ))
                });
                QueryOutput::records(ResultView::AffectList, &affects)
            }
            EntityOperation::AffectsGet => {
                let affect = self
                    .incident_db
                    .retrieve_affect(self.params.require(&spec, "uuid")?)
                    .await?;
                QueryOutput::record(ResultView::Affect, &affect)
            }
            EntityOperation::TrackersList => {
                let mut trackers = self
                    .incident_db
                    .list_trackers(&self.params.conditions(&[]))
                    .await?;
                trackers.sort_by(|a, b| {
                    a.external_system_id
                        .cmp(&b.external_system_id)
                        .then_with(|| a.uuid.cmp(&b.uuid))
                });
                QueryOutput::records(ResultView::TrackerList, &trackers)
            }
            EntityOperation::TrackersGet => {
                let tracker = self
                    .incident_db
                    .retrieve_tracker(self.params.require(&spec, "uuid")?)
                    .await?;
                QueryOutput::record(ResultView::Tracker, &tracker)
            }
            other => anyhow::bail!("{} is not an incident database operation", other),
        }
    }
}
