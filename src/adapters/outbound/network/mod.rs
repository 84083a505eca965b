mod component_registry_client;
mod http_session_provider;
mod incident_database_client;
mod rest_session;
mod wire;

pub use component_registry_client::ComponentRegistryClient;
pub use http_session_provider::HttpSessionProvider;
pub use incident_database_client::IncidentDatabaseClient;
pub use rest_session::{RestSession, SessionSettings};
