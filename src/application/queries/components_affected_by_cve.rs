use super::component_listing::{by_purl, ComponentListing};
use super::{api_link, Query};
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::{ComponentRegistry, IncidentDatabase};
use crate::query_engine::domain::{
    Affect, Component, Conditions, ParameterSpec, ProductRef, ProductVersion, QueryParameters,
};
use crate::query_engine::services::{fan_out, PaginatedFetcher};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const SPEC: ParameterSpec = ParameterSpec {
    name: "components-affected-by-cve",
    allowed: &[
        "cve_id",
        "affectedness",
        "affect_resolution",
        "affect_impact",
        "component_type",
        "namespace",
    ],
    required: &["cve_id"],
    needs_parameters: true,
};

/// Largest number of affects requested for one flaw
pub const AFFECT_LIMIT: usize = 1000;

const AFFECT_CONDITIONS: &[(&str, &str)] = &[
    ("affectedness", "affectedness"),
    ("affect_resolution", "resolution"),
    ("affect_impact", "impact"),
];

const COMPONENT_CONDITIONS: &[(&str, &str)] =
    &[("namespace", "namespace"), ("component_type", "type")];

/// Registry fields needed to build an [`AffectedComponent`]
const INCLUDE_FIELDS: &str = "link,purl,name,type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedComponent {
    pub link: String,
    pub purl: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: Option<String>,
}

impl From<Component> for AffectedComponent {
    fn from(component: Component) -> Self {
        Self {
            link: component.link,
            purl: component.purl,
            name: component.name,
            component_type: component.component_type,
        }
    }
}

/// An affect whose product version was found in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAffect {
    pub link: String,
    pub product_version_name: String,
    pub component_name: String,
    pub affectedness: Option<String>,
    pub affect_impact: Option<String>,
    pub affect_resolution: Option<String>,
    pub components: Vec<AffectedComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedComponents {
    pub link: String,
    pub cve_id: String,
    pub title: String,
    pub description: String,
    pub affects: Vec<ResolvedAffect>,
}

/// Given a CVE id, which registry components are affected?
///
/// The flaw's affects name a product version (`ps_module`) and a component
/// (`ps_component`) as free text. Each affect is resolved concurrently: the
/// product version is looked up by name, then the component is listed in
/// every product stream of that version, again concurrently. Affects whose
/// product version the registry does not know are skipped.
pub struct ComponentsAffectedByCve<R: ComponentRegistry, D: IncidentDatabase> {
    registry: R,
    incident_db: D,
    fetcher: PaginatedFetcher,
    params: QueryParameters,
}

impl<R: ComponentRegistry, D: IncidentDatabase> ComponentsAffectedByCve<R, D> {
    pub fn new(registry: R, incident_db: D, params: QueryParameters) -> Self {
        Self {
            registry,
            incident_db,
            fetcher: PaginatedFetcher::default(),
            params,
        }
    }

    pub fn with_fetcher(mut self, fetcher: PaginatedFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub async fn execute(&self) -> Result<AffectedComponents> {
        self.params.validate(&SPEC)?;
        let cve_id = self.params.require(&SPEC, "cve_id")?;
        let affect_conditions = self.params.conditions(AFFECT_CONDITIONS);
        let component_conditions = self.params.conditions(COMPONENT_CONDITIONS);

        let flaw = self.incident_db.retrieve_flaw(cve_id).await?;
        let affects = self
            .incident_db
            .list_affects(Some(&flaw.uuid), &affect_conditions, AFFECT_LIMIT)
            .await?;
        log::debug!("{} has {} affect(s)", flaw.identifier(), affects.len());

        let resolved = fan_out(
            &format!("resolve affects of {}", cve_id),
            affects,
            self.fetcher.max_concurrent_requests(),
            |affect| self.resolve_affect(affect, &component_conditions),
        )
        .await?;

        let mut affects: Vec<ResolvedAffect> = resolved.into_iter().flatten().collect();
        affects.sort_by(|a, b| {
            a.product_version_name
                .cmp(&b.product_version_name)
                .then_with(|| a.component_name.cmp(&b.component_name))
                .then_with(|| a.link.cmp(&b.link))
        });

        Ok(AffectedComponents {
            link: api_link(
                self.incident_db.base_url(),
                &format!(
                    "osidb/api/v1/flaws/{}",
                    urlencoding::encode(flaw.identifier())
                ),
            ),
            cve_id: flaw.cve_id.clone().unwrap_or_else(|| cve_id.to_string()),
            title: flaw.title,
            description: flaw.description,
            affects,
        })
    }

    /// Resolves one affect; `None` when its product version is unknown to the registry
    async fn resolve_affect(
        &self,
        affect: Affect,
        component_conditions: &Conditions,
    ) -> Result<Option<ResolvedAffect>> {
        let Some(product_version) = self.find_product_version(&affect.ps_module).await? else {
            log::info!(
                "Product version '{}' of affect {} is not in the component registry, skipping",
                affect.ps_module,
                affect.uuid
            );
            return Ok(None);
        };

        let listings = fan_out(
            &format!("list {} in product streams of {}", affect.ps_component, product_version.name),
            product_version.product_streams.iter(),
            self.fetcher.max_concurrent_requests(),
            |stream| self.components_in_stream(stream, &affect.ps_component, component_conditions),
        )
        .await?;

        let mut components: Vec<Component> = listings.into_iter().flatten().collect();
        components.sort_by(by_purl);
        components.dedup_by(|a, b| a.purl == b.purl);

        Ok(Some(ResolvedAffect {
            link: api_link(
                self.incident_db.base_url(),
                &format!("osidb/api/v1/affects/{}", urlencoding::encode(&affect.uuid)),
            ),
            product_version_name: affect.ps_module,
            component_name: affect.ps_component,
            affectedness: affect.affectedness,
            affect_impact: affect.impact,
            affect_resolution: affect.resolution,
            components: components.into_iter().map(AffectedComponent::from).collect(),
        }))
    }

    async fn find_product_version(&self, name: &str) -> Result<Option<ProductVersion>> {
        if name.is_empty() {
            return Ok(None);
        }
        let mut versions = self.registry.list_product_versions(name).await?;
        versions.sort_by(|a, b| (a.name != name).cmp(&(b.name != name)).then_with(|| a.ofuri.cmp(&b.ofuri)));
        Ok(versions.into_iter().next())
    }

    async fn components_in_stream(
        &self,
        stream: &ProductRef,
        component_name: &str,
        component_conditions: &Conditions,
    ) -> Result<Vec<Component>> {
        let mut conditions = component_conditions.clone();
        conditions.insert("ofuri".to_string(), stream.ofuri.clone());
        conditions.insert("name".to_string(), component_name.to_string());
        conditions.insert("include_fields".to_string(), INCLUDE_FIELDS.to_string());

        let listing = ComponentListing::new(&self.registry, conditions);
        self.fetcher.fetch_all(&listing, by_purl).await
    }
}

#[async_trait(?Send)]
impl<R: ComponentRegistry, D: IncidentDatabase> Query for ComponentsAffectedByCve<R, D> {
    fn spec(&self) -> ParameterSpec {
        SPEC
    }

    async fn run(&self) -> Result<QueryOutput> {
        let result = self.execute().await?;
        QueryOutput::record(ResultView::ComponentsAffectedByCve, &result)
    }
}
