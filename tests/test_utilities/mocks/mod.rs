/// Mock implementations for testing
mod fake_component_registry;
mod fake_incident_database;
mod fake_session_provider;
mod mock_progress_reporter;

pub use fake_component_registry::FakeComponentRegistry;
pub use fake_incident_database::FakeIncidentDatabase;
pub use fake_session_provider::FakeSessionProvider;
pub use mock_progress_reporter::MockProgressReporter;
