use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{OutputFormat, QueryRequest};
use crate::application::entities::EntityOperation;
use crate::application::queries::QueryKind;
use crate::query_engine::domain::QueryParameters;

/// Query a component registry and an incident database together
#[derive(Parser, Debug)]
#[command(name = "prodsec-query")]
#[command(version)]
#[command(
    about = "Query a component registry and an incident database together",
    long_about = None
)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format: json, text or table
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored text output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print full purls instead of the condensed component display
    #[arg(long, global = true)]
    pub show_purl: bool,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to ./prodsec-query.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Component registry base URL
    #[arg(long, global = true, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Incident database base URL
    #[arg(long, global = true, value_name = "URL")]
    pub incident_db_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Questions that span components, products and flaws
    Queries {
        #[command(subcommand)]
        query: QueryCommand,
    },
    /// Direct list/get access to single entities
    Entities {
        /// Open the link of a single-entity result in the default browser
        #[arg(long)]
        open_browser: bool,

        #[command(subcommand)]
        entity: EntityCommand,
    },
}

impl Command {
    /// Translates the parsed command into a use case request
    ///
    /// Values are passed through unvalidated; the query decides what is acceptable.
    pub fn into_request(self) -> QueryRequest {
        match self {
            Command::Queries { query } => query.into_request(),
            Command::Entities { entity, .. } => entity.into_request(),
        }
    }

    pub fn opens_browser(&self) -> bool {
        matches!(self, Command::Entities { open_browser: true, .. })
    }
}

#[derive(Subcommand, Debug)]
pub enum QueryCommand {
    /// Product versions with an affect on a CVE
    ProductVersionsAffectedByCve {
        #[arg(long)]
        cve_id: Option<String>,
    },
    /// Product streams shipping a component
    ProductsContainComponent {
        /// Exact artifact; takes precedence over --name
        #[arg(long)]
        purl: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Summary of one product stream
    ProductStreamSummary {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        ofuri: Option<String>,
    },
    /// Components built from a component
    ComponentsContainComponent {
        /// Exact artifact; takes precedence over --name
        #[arg(long)]
        purl: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
        /// Only keep sources whose purl contains this type (e.g. npm)
        #[arg(long = "type")]
        component_type: Option<String>,
    },
    /// Components shipped in product streams affected by a CVE
    ComponentsAffectedByCve {
        #[arg(long)]
        cve_id: Option<String>,
        #[arg(long)]
        affectedness: Option<String>,
        #[arg(long)]
        resolution: Option<String>,
        #[arg(long)]
        impact: Option<String>,
        #[arg(long = "type")]
        component_type: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
    },
}

impl QueryCommand {
    pub fn into_request(self) -> QueryRequest {
        match self {
            QueryCommand::ProductVersionsAffectedByCve { cve_id } => QueryRequest::query(
                QueryKind::ProductVersionsAffectedByCve,
                QueryParameters::new().with("cve_id", cve_id),
            ),
            QueryCommand::ProductsContainComponent {
                purl,
                name,
                namespace,
            } => {
                let kind = if purl.is_some() {
                    QueryKind::ProductsContainingSpecificComponent
                } else {
                    QueryKind::ProductsContainingComponent
                };
                QueryRequest::query(
                    kind,
                    QueryParameters::new()
                        .with("purl", purl)
                        .with("component_name", name)
                        .with("namespace", namespace),
                )
            }
            QueryCommand::ProductStreamSummary { name, ofuri } => QueryRequest::query(
                QueryKind::ProductStreamSummary,
                QueryParameters::new()
                    .with("product_stream_name", name)
                    .with("ofuri", ofuri),
            ),
            QueryCommand::ComponentsContainComponent {
                purl,
                name,
                namespace,
                component_type,
            } => {
                let kind = if purl.is_some() {
                    QueryKind::ComponentsContainingSpecificComponent
                } else {
                    QueryKind::ComponentsContainingComponent
                };
                QueryRequest::query(
                    kind,
                    QueryParameters::new()
                        .with("purl", purl)
                        .with("component_name", name)
                        .with("namespace", namespace)
                        .with("component_type", component_type),
                )
            }
            QueryCommand::ComponentsAffectedByCve {
                cve_id,
                affectedness,
                resolution,
                impact,
                component_type,
                namespace,
            } => QueryRequest::query(
                QueryKind::ComponentsAffectedByCve,
                QueryParameters::new()
                    .with("cve_id", cve_id)
                    .with("affectedness", affectedness)
                    .with("affect_resolution", resolution)
                    .with("affect_impact", impact)
                    .with("component_type", component_type)
                    .with("namespace", namespace),
            ),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum EntityCommand {
    /// Components of the component registry
    Components {
        #[command(subcommand)]
        operation: ComponentsOperation,
    },
    /// Product streams of the component registry
    ProductStreams {
        #[command(subcommand)]
        operation: ProductStreamsOperation,
    },
    /// Flaws of the incident database
    Flaws {
        #[command(subcommand)]
        operation: FlawsOperation,
    },
    /// Affects of the incident database
    Affects {
        #[command(subcommand)]
        operation: AffectsOperation,
    },
    /// Trackers of the incident database
    Trackers {
        #[command(subcommand)]
        operation: TrackersOperation,
    },
}

impl EntityCommand {
    pub fn into_request(self) -> QueryRequest {
        match self {
            EntityCommand::Components { operation } => operation.into_request(),
            EntityCommand::ProductStreams { operation } => operation.into_request(),
            EntityCommand::Flaws { operation } => operation.into_request(),
            EntityCommand::Affects { operation } => operation.into_request(),
            EntityCommand::Trackers { operation } => operation.into_request(),
        }
    }
}

/// Registry-side component filters
#[derive(ClapArgs, Debug, Default)]
pub struct ComponentFilters {
    #[arg(long)]
    pub namespace: Option<String>,
    #[arg(long)]
    pub ofuri: Option<String>,
    /// Regular expression matched against the purl
    #[arg(long)]
    pub re_purl: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    /// Regular expression matched against the name
    #[arg(long)]
    pub re_name: Option<String>,
    #[arg(long)]
    pub version: Option<String>,
    #[arg(long = "type")]
    pub component_type: Option<String>,
    #[arg(long)]
    pub arch: Option<String>,
    /// Response detail (defaults to summary)
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ComponentsOperation {
    List(ComponentFilters),
    Get {
        #[arg(long)]
        purl: Option<String>,
    },
    GetManifest {
        #[arg(long)]
        uuid: Option<String>,
        #[arg(long)]
        purl: Option<String>,
    },
}

impl ComponentsOperation {
    pub fn into_request(self) -> QueryRequest {
        match self {
            ComponentsOperation::List(filters) => QueryRequest::entity(
                EntityOperation::ComponentsList,
                QueryParameters::new()
                    .with("namespace", filters.namespace)
                    .with("ofuri", filters.ofuri)
                    .with("re_purl", filters.re_purl)
                    .with("name", filters.name)
                    .with("re_name", filters.re_name)
                    .with("version", filters.version)
                    .with("type", filters.component_type)
                    .with("arch", filters.arch)
                    .with("view", filters.view),
            ),
            ComponentsOperation::Get { purl } => QueryRequest::entity(
                EntityOperation::ComponentsGet,
                QueryParameters::new().with("purl", purl),
            ),
            ComponentsOperation::GetManifest { uuid, purl } => QueryRequest::entity(
                EntityOperation::ComponentsGetManifest,
                QueryParameters::new().with("uuid", uuid).with("purl", purl),
            ),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ProductStreamsOperation {
    List {
        /// Regular expression matched against the name
        #[arg(long)]
        re_name: Option<String>,
    },
    Get {
        #[arg(long)]
        ofuri: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    GetManifest {
        #[arg(long)]
        ofuri: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    GetLatestComponents {
        #[arg(long)]
        ofuri: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
        #[arg(long)]
        view: Option<String>,
    },
}

impl ProductStreamsOperation {
    pub fn into_request(self) -> QueryRequest {
        match self {
            ProductStreamsOperation::List { re_name } => QueryRequest::entity(
                EntityOperation::ProductStreamsList,
                QueryParameters::new().with("re_name", re_name),
            ),
            ProductStreamsOperation::Get { ofuri, name } => QueryRequest::entity(
                EntityOperation::ProductStreamsGet,
                QueryParameters::new().with("ofuri", ofuri).with("name", name),
            ),
            ProductStreamsOperation::GetManifest { ofuri, name } => QueryRequest::entity(
                EntityOperation::ProductStreamsGetManifest,
                QueryParameters::new().with("ofuri", ofuri).with("name", name),
            ),
            ProductStreamsOperation::GetLatestComponents {
                ofuri,
                name,
                namespace,
                view,
            } => QueryRequest::entity(
                EntityOperation::ProductStreamsGetLatestComponents,
                QueryParameters::new()
                    .with("ofuri", ofuri)
                    .with("name", name)
                    .with("namespace", namespace)
                    .with("view", view),
            ),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FlawsOperation {
    List {
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        resolution: Option<String>,
        #[arg(long)]
        impact: Option<String>,
    },
    Get {
        #[arg(long)]
        cve_id: Option<String>,
        #[arg(long)]
        uuid: Option<String>,
    },
}

impl FlawsOperation {
    pub fn into_request(self) -> QueryRequest {
        match self {
            FlawsOperation::List {
                state,
                resolution,
                impact,
            } => QueryRequest::entity(
                EntityOperation::FlawsList,
                QueryParameters::new()
                    .with("state", state)
                    .with("resolution", resolution)
                    .with("impact", impact),
            ),
            FlawsOperation::Get { cve_id, uuid } => QueryRequest::entity(
                EntityOperation::FlawsGet,
                QueryParameters::new().with("cve_id", cve_id).with("uuid", uuid),
            ),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AffectsOperation {
    List {
        #[arg(long)]
        ps_module: Option<String>,
        #[arg(long)]
        ps_component: Option<String>,
        #[arg(long)]
        affectedness: Option<String>,
        #[arg(long)]
        resolution: Option<String>,
        #[arg(long)]
        impact: Option<String>,
    },
    Get {
        #[arg(long)]
        uuid: Option<String>,
    },
}

impl AffectsOperation {
    pub fn into_request(self) -> QueryRequest {
        match self {
            AffectsOperation::List {
                ps_module,
                ps_component,
                affectedness,
                resolution,
                impact,
            } => QueryRequest::entity(
                EntityOperation::AffectsList,
                QueryParameters::new()
                    .with("ps_module", ps_module)
                    .with("ps_component", ps_component)
                    .with("affectedness", affectedness)
                    .with("resolution", resolution)
                    .with("impact", impact),
            ),
            AffectsOperation::Get { uuid } => QueryRequest::entity(
                EntityOperation::AffectsGet,
                QueryParameters::new().with("uuid", uuid),
            ),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum TrackersOperation {
    List,
    Get {
        #[arg(long)]
        uuid: Option<String>,
    },
}

impl TrackersOperation {
    pub fn into_request(self) -> QueryRequest {
        match self {
            TrackersOperation::List => {
                QueryRequest::entity(EntityOperation::TrackersList, QueryParameters::new())
            }
            TrackersOperation::Get { uuid } => QueryRequest::entity(
                EntityOperation::TrackersGet,
                QueryParameters::new().with("uuid", uuid),
            ),
        }
    }
}
