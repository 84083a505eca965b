//! prodsec-query - answer product security questions across two services
//!
//! This library queries a component registry (components, product streams,
//! product versions) and an incident database (flaws, affects, trackers) and
//! joins their answers, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`query_engine`): Entities, parameters, pagination and fan-out
//! - **Application Layer** (`application`): Query objects, entity operations and use cases
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use prodsec_query::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let provider = HttpSessionProvider::new(
//!     Some("https://registry.example.com".to_string()),
//!     Some("https://osidb.example.com".to_string()),
//!     SessionSettings::default(),
//! );
//! let use_case = RunQueryUseCase::new(
//!     provider,
//!     StderrProgressReporter::new(),
//!     PaginatedFetcher::default(),
//! );
//!
//! let request = QueryRequest::query(
//!     QueryKind::ComponentsAffectedByCve,
//!     QueryParameters::new().with("cve_id", Some("CVE-2023-38545")),
//! );
//! let output = use_case.execute(request).await?;
//!
//! let formatter = FormatterFactory::create(OutputFormat::Json, FormatterOptions::default());
//! println!("{}", formatter.format(&output)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod query_engine;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{SilentProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{HttpSessionProvider, SessionSettings};
    pub use crate::application::dto::{OutputFormat, QueryOutput, QueryRequest, ResultView};
    pub use crate::application::entities::EntityOperation;
    pub use crate::application::factories::{FormatterFactory, FormatterOptions};
    pub use crate::application::queries::{Query, QueryKind};
    pub use crate::application::use_cases::RunQueryUseCase;
    pub use crate::ports::outbound::{
        ComponentRegistry, IncidentDatabase, OutputPresenter, ProgressReporter, ResultFormatter,
        SessionProvider,
    };
    pub use crate::query_engine::domain::{
        Affect, Component, ComponentRef, Conditions, Flaw, Page, PageWindow, ParameterSpec,
        Manifest, ProductRef, ProductStream, ProductVersion, QueryParameters, Tracker,
    };
    pub use crate::query_engine::services::{fan_out, filter_sources, PaginatedFetcher};
    pub use crate::shared::error::{ExitCode, QueryError};
    pub use crate::shared::Result;
}
