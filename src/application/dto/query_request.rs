use crate::application::entities::EntityOperation;
use crate::application::queries::QueryKind;
use crate::query_engine::domain::QueryParameters;
use crate::shared::error::QueryError;

/// What the caller wants answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTarget {
    Query(QueryKind),
    Entity(EntityOperation),
}

impl QueryTarget {
    pub fn name(&self) -> &'static str {
        match self {
            QueryTarget::Query(kind) => kind.name(),
            QueryTarget::Entity(operation) => operation.name(),
        }
    }
}

/// QueryRequest - request DTO for the run-query use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub target: QueryTarget,
    pub params: QueryParameters,
}

impl QueryRequest {
    pub fn query(kind: QueryKind, params: QueryParameters) -> Self {
        Self {
            target: QueryTarget::Query(kind),
            params,
        }
    }

    pub fn entity(operation: EntityOperation, params: QueryParameters) -> Self {
        Self {
            target: QueryTarget::Entity(operation),
            params,
        }
    }

    /// Validates the parameters against the target's allow-list
    pub fn validate(&self) -> Result<(), QueryError> {
        match self.target {
            QueryTarget::Query(kind) => kind.validate(&self.params),
            QueryTarget::Entity(operation) => operation.validate(&self.params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dispatches_to_target() {
        let request = QueryRequest::query(QueryKind::ComponentsAffectedByCve, QueryParameters::new());
        assert!(request.validate().is_err());

        let request = QueryRequest::entity(EntityOperation::TrackersList, QueryParameters::new());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_entity_target_name() {
        let target = QueryTarget::Entity(EntityOperation::FlawsGet);
        assert_eq!(target.name(), "flaws get");
    }
}
