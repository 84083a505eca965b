use crate::application::dto::{QueryOutput, QueryRequest, QueryTarget};
use crate::application::entities::{EntityOperation, IncidentEntities, RegistryEntities, Service};
use crate::application::queries::{
    ComponentsAffectedByCve, ComponentsContainingComponent,
    ComponentsContainingSpecificComponent, ProductStreamSummaryQuery,
    ProductVersionsAffectedByCve, ProductsContainingComponent,
    ProductsContainingSpecificComponent, Query, QueryKind,
};
use crate::ports::outbound::{ProgressReporter, SessionProvider};
use crate::query_engine::domain::QueryParameters;
use crate::query_engine::services::PaginatedFetcher;
use crate::shared::Result;

/// RunQueryUseCase - Core use case for answering one query
///
/// Validates the request, opens the sessions the target needs, executes the
/// query and returns its normalized result.
///
/// # Type Parameters
/// * `SP` - SessionProvider implementation
/// * `PR` - ProgressReporter implementation
pub struct RunQueryUseCase<SP, PR> {
    session_provider: SP,
    progress_reporter: PR,
    fetcher: PaginatedFetcher,
}

impl<SP, PR> RunQueryUseCase<SP, PR>
where
    SP: SessionProvider,
    PR: ProgressReporter,
{
    /// Creates a new RunQueryUseCase with injected dependencies
    pub fn new(session_provider: SP, progress_reporter: PR, fetcher: PaginatedFetcher) -> Self {
        Self {
            session_provider,
            progress_reporter,
            fetcher,
        }
    }

    /// Executes the query use case
    ///
    /// # Arguments
    /// * `request` - Target and parameters
    ///
    /// # Returns
    /// The normalized result
    ///
    /// # Errors
    /// Caller errors are returned before any session is opened. Session,
    /// fetch and fan-out failures abort the whole query.
    pub async fn execute(&self, request: QueryRequest) -> Result<QueryOutput> {
        // Step 1: Reject bad parameters without touching the network
        request.validate()?;

        self.progress_reporter
            .start(&format!("🔎 Running {}...", request.target.name()));

        // Step 2: Open sessions and build the query object
        // Step 3: Execute it
        let result = match self.build_query(request).await {
            Ok(query) => {
                log::debug!("Executing {}", query.spec().name);
                query.run().await
            }
            Err(err) => Err(err),
        };

        self.progress_reporter.finish();
        result
    }

    /// Opens the sessions a target needs and hands them to its query object
    async fn build_query(&self, request: QueryRequest) -> Result<Box<dyn Query>> {
        let QueryRequest { target, params } = request;
        match target {
            QueryTarget::Query(kind) => self.build_cross_service_query(kind, params).await,
            QueryTarget::Entity(operation) => self.build_entity_query(operation, params).await,
        }
    }

    async fn build_cross_service_query(
        &self,
        kind: QueryKind,
        params: QueryParameters,
    ) -> Result<Box<dyn Query>> {
        let fetcher = self.fetcher;
        let query: Box<dyn Query> = match kind {
            QueryKind::ProductVersionsAffectedByCve => {
                let registry_url = self
                    .session_provider
                    .registry_url()
                    .unwrap_or_default()
                    .to_string();
                Box::new(ProductVersionsAffectedByCve::new(
                    self.session_provider.incident_database().await?,
                    registry_url,
                    params,
                ))
            }
            QueryKind::ProductsContainingSpecificComponent => {
                Box::new(ProductsContainingSpecificComponent::new(
                    self.session_provider.component_registry().await?,
                    params,
                ))
            }
            QueryKind::ProductsContainingComponent => Box::new(
                ProductsContainingComponent::new(
                    self.session_provider.component_registry().await?,
                    params,
                )
                .with_fetcher(fetcher),
            ),
            QueryKind::ProductStreamSummary => Box::new(ProductStreamSummaryQuery::new(
                self.session_provider.component_registry().await?,
                params,
            )),
            QueryKind::ComponentsContainingSpecificComponent => {
                Box::new(ComponentsContainingSpecificComponent::new(
                    self.session_provider.component_registry().await?,
                    params,
                ))
            }
            QueryKind::ComponentsContainingComponent => Box::new(
                ComponentsContainingComponent::new(
                    self.session_provider.component_registry().await?,
                    params,
                )
                .with_fetcher(fetcher),
            ),
            QueryKind::ComponentsAffectedByCve => {
                let registry = self.session_provider.component_registry().await?;
                let incident_db = self.session_provider.incident_database().await?;
                Box::new(ComponentsAffectedByCve::new(registry, incident_db, params).with_fetcher(fetcher))
            }
        };
        Ok(query)
    }

    async fn build_entity_query(
        &self,
        operation: EntityOperation,
        params: QueryParameters,
    ) -> Result<Box<dyn Query>> {
        Ok(match operation.service() {
            Service::ComponentRegistry => Box::new(
                RegistryEntities::new(
                    self.session_provider.component_registry().await?,
                    operation,
                    params,
                )?
                .with_fetcher(self.fetcher),
            ),
            Service::IncidentDatabase => Box::new(IncidentEntities::new(
                self.session_provider.incident_database().await?,
                operation,
                params,
            )?),
        })
    }
}
