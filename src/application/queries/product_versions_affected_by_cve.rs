use super::{api_link, Query};
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::IncidentDatabase;
use crate::query_engine::domain::{ParameterSpec, QueryParameters};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;

pub const SPEC: ParameterSpec = ParameterSpec {
    name: "product-versions-affected-by-cve",
    allowed: &["cve_id"],
    required: &["cve_id"],
    needs_parameters: true,
};

/// Registry link to a product version named by an affect
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ProductVersionLink {
    pub link: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedProductVersions {
    pub link: String,
    pub cve_id: String,
    pub title: String,
    pub description: String,
    pub product_versions: Vec<ProductVersionLink>,
}

/// Given a CVE id, which product versions are affected?
///
/// Only the incident database is queried. The product version names come
/// from the flaw's affects; the links point into the component registry.
pub struct ProductVersionsAffectedByCve<D: IncidentDatabase> {
    incident_db: D,
    registry_url: String,
    params: QueryParameters,
}

impl<D: IncidentDatabase> ProductVersionsAffectedByCve<D> {
    pub fn new(incident_db: D, registry_url: impl Into<String>, params: QueryParameters) -> Self {
        Self {
            incident_db,
            registry_url: registry_url.into(),
            params,
        }
    }

    pub async fn execute(&self) -> Result<AffectedProductVersions> {
        self.params.validate(&SPEC)?;
        let cve_id = self.params.require(&SPEC, "cve_id")?;

        let flaw = self.incident_db.retrieve_flaw(cve_id).await?;

        let names: BTreeSet<&str> = flaw
            .affects
            .iter()
            .map(|affect| affect.ps_module.as_str())
            .filter(|name| !name.is_empty())
            .collect();

        let product_versions = names
            .into_iter()
            .map(|name| ProductVersionLink {
                link: api_link(
                    &self.registry_url,
                    &format!("api/v1/product_versions?name={}", urlencoding::encode(name)),
                ),
                name: name.to_string(),
            })
            .collect();

        Ok(AffectedProductVersions {
            link: api_link(
                self.incident_db.base_url(),
                &format!("osidb/api/v1/flaws/{}", urlencoding::encode(cve_id)),
            ),
            cve_id: flaw.cve_id.clone().unwrap_or_else(|| cve_id.to_string()),
            title: flaw.title,
            description: flaw.description,
            product_versions,
        })
    }
}

#[async_trait(?Send)]
impl<D: IncidentDatabase> Query for ProductVersionsAffectedByCve<D> {
    fn spec(&self) -> ParameterSpec {
        SPEC
    }

    async fn run(&self) -> Result<QueryOutput> {
        let result = self.execute().await?;
        QueryOutput::record(ResultView::ProductVersionsAffectedByCve, &result)
    }
}
