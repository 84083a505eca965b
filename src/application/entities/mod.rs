//! Direct list/get access to single entities of both services
mod incident_entities;
mod registry_entities;

pub use incident_entities::IncidentEntities;
pub use registry_entities::RegistryEntities;

use crate::query_engine::domain::{ParameterSpec, QueryParameters};
use crate::shared::error::QueryError;

/// The service an entity operation talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    ComponentRegistry,
    IncidentDatabase,
}

/// Entity operations reachable from `entities <kind> <operation>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityOperation {
    ComponentsList,
    ComponentsGet,
    ComponentsGetManifest,
    ProductStreamsList,
    ProductStreamsGet,
    ProductStreamsGetManifest,
    ProductStreamsGetLatestComponents,
    FlawsList,
    FlawsGet,
    AffectsList,
    AffectsGet,
    TrackersList,
    TrackersGet,
}

const COMPONENT_FILTERS: &[&str] = &[
    "namespace", "ofuri", "re_purl", "name", "re_name", "version", "type", "arch",
];

impl EntityOperation {
    pub const ALL: [EntityOperation; 13] = [
        EntityOperation::ComponentsList,
        EntityOperation::ComponentsGet,
        EntityOperation::ComponentsGetManifest,
        EntityOperation::ProductStreamsList,
        EntityOperation::ProductStreamsGet,
        EntityOperation::ProductStreamsGetManifest,
        EntityOperation::ProductStreamsGetLatestComponents,
        EntityOperation::FlawsList,
        EntityOperation::FlawsGet,
        EntityOperation::AffectsList,
        EntityOperation::AffectsGet,
        EntityOperation::TrackersList,
        EntityOperation::TrackersGet,
    ];

    pub fn spec(&self) -> ParameterSpec {
        match self {
            EntityOperation::ComponentsList => ParameterSpec {
                name: "components list",
                allowed: &[
                    "namespace", "ofuri", "re_purl", "name", "re_name", "version", "type",
                    "arch", "view",
                ],
                required: COMPONENT_FILTERS,
                needs_parameters: true,
            },
            EntityOperation::ComponentsGet => ParameterSpec {
                name: "components get",
                allowed: &["purl"],
                required: &["purl"],
                needs_parameters: true,
            },
            EntityOperation::ComponentsGetManifest => ParameterSpec {
                name: "components get-manifest",
                allowed: &["uuid", "purl"],
                required: &["uuid", "purl"],
                needs_parameters: true,
            },
            EntityOperation::ProductStreamsList => ParameterSpec {
                name: "product-streams list",
                allowed: &["re_name"],
                required: &[],
                needs_parameters: false,
            },
            EntityOperation::ProductStreamsGet => ParameterSpec {
                name: "product-streams get",
                allowed: &["ofuri", "name"],
                required: &["ofuri", "name"],
                needs_parameters: true,
            },
            EntityOperation::ProductStreamsGetManifest => ParameterSpec {
                name: "product-streams get-manifest",
                allowed: &["ofuri", "name"],
                required: &["ofuri", "name"],
                needs_parameters: true,
            },
            EntityOperation::ProductStreamsGetLatestComponents => ParameterSpec {
                name: "product-streams get-latest-components",
                allowed: &["ofuri", "name", "namespace", "view"],
                required: &["ofuri", "name"],
                needs_parameters: true,
            },
            EntityOperation::FlawsList => ParameterSpec {
                name: "flaws list",
                allowed: &["state", "resolution", "impact"],
                required: &["state", "resolution", "impact"],
                needs_parameters: true,
            },
            EntityOperation::FlawsGet => ParameterSpec {
                name: "flaws get",
                allowed: &["cve_id", "uuid"],
                required: &["cve_id", "uuid"],
                needs_parameters: true,
            },
            EntityOperation::AffectsList => ParameterSpec {
                name: "affects list",
                allowed: &["ps_module", "ps_component", "affectedness", "resolution", "impact"],
                required: &["ps_module", "ps_component", "affectedness", "resolution", "impact"],
                needs_parameters: true,
            },
            EntityOperation::AffectsGet => ParameterSpec {
                name: "affects get",
                allowed: &["uuid"],
                required: &["uuid"],
                needs_parameters: true,
            },
            EntityOperation::TrackersList => ParameterSpec {
                name: "trackers list",
                allowed: &[],
                required: &[],
                needs_parameters: false,
            },
            EntityOperation::TrackersGet => ParameterSpec {
                name: "trackers get",
                allowed: &["uuid"],
                required: &["uuid"],
                needs_parameters: true,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn service(&self) -> Service {
        match self {
            EntityOperation::ComponentsList
            | EntityOperation::ComponentsGet
            | EntityOperation::ComponentsGetManifest
            | EntityOperation::ProductStreamsList
            | EntityOperation::ProductStreamsGet
            | EntityOperation::ProductStreamsGetManifest
            | EntityOperation::ProductStreamsGetLatestComponents => Service::ComponentRegistry,
            EntityOperation::FlawsList
            | EntityOperation::FlawsGet
            | EntityOperation::AffectsList
            | EntityOperation::AffectsGet
            | EntityOperation::TrackersList
            | EntityOperation::TrackersGet => Service::IncidentDatabase,
        }
    }

    /// Checks `params` without opening any session
    ///
    /// Besides the allow-list, a `uuid` parameter must be a well-formed UUID.
    pub fn validate(&self, params: &QueryParameters) -> Result<(), QueryError> {
        params.validate(&self.spec())?;
        if let Some(uuid) = params.get("uuid") {
            uuid::Uuid::parse_str(uuid).map_err(|err| QueryError::InvalidParameterValue {
                parameter: "uuid".to_string(),
                reason: format!("'{}' is not a UUID ({})", uuid, err),
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Display for EntityOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterless_operations() {
        for operation in EntityOperation::ALL {
            let result = operation.validate(&QueryParameters::new());
            let parameterless = matches!(
                operation,
                EntityOperation::ProductStreamsList | EntityOperation::TrackersList
            );
            assert_eq!(result.is_ok(), parameterless, "{}", operation);
        }
    }

    #[test]
    fn test_uuid_must_be_well_formed() {
        let params = QueryParameters::new().with("uuid", Some("not-a-uuid"));
        let err = EntityOperation::TrackersGet.validate(&params).unwrap_err();
        assert!(matches!(err, QueryError::InvalidParameterValue { .. }));

        let params =
            QueryParameters::new().with("uuid", Some("6b5f0c7e-3f8a-4d0e-9d43-1c8b5f1a2b3c"));
        assert!(EntityOperation::AffectsGet.validate(&params).is_ok());
    }

    #[test]
    fn test_view_alone_does_not_select_components() {
        let params = QueryParameters::new().with("view", Some("summary"));
        let err = EntityOperation::ComponentsList.validate(&params).unwrap_err();
        assert!(matches!(err, QueryError::MissingRequired { .. }));
    }

    #[test]
    fn test_services() {
        assert_eq!(EntityOperation::ComponentsList.service(), Service::ComponentRegistry);
        assert_eq!(EntityOperation::TrackersGet.service(), Service::IncidentDatabase);
    }
}
