/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (remote services, file system, console).
pub mod component_registry;
pub mod formatter;
pub mod incident_database;
pub mod output_presenter;
pub mod progress_reporter;
pub mod session_provider;

pub use component_registry::ComponentRegistry;
pub use formatter::ResultFormatter;
pub use incident_database::IncidentDatabase;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use session_provider::SessionProvider;
