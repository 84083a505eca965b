use super::{api_link, Query};
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::ComponentRegistry;
use crate::query_engine::domain::{Conditions, ParameterSpec, ProductStream, QueryParameters};
use crate::shared::error::QueryError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const SPEC: ParameterSpec = ParameterSpec {
    name: "product-stream-summary",
    allowed: &["product_stream_name", "ofuri"],
    required: &["product_stream_name", "ofuri"],
    needs_parameters: true,
};

const CONDITIONS: &[(&str, &str)] = &[("product_stream_name", "name"), ("ofuri", "ofuri")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductStreamSummary {
    pub link: String,
    pub ofuri: String,
    pub name: String,
    pub product: Option<String>,
    pub product_version: Option<String>,
    pub brew_tags: Vec<String>,
    pub build_count: u64,
    pub latest_component_count: usize,
    pub manifest_link: String,
    pub latest_components_link: String,
    pub all_components_link: String,
}

/// Summary of one product stream, including how many latest components it has
pub struct ProductStreamSummaryQuery<R: ComponentRegistry> {
    registry: R,
    params: QueryParameters,
}

impl<R: ComponentRegistry> ProductStreamSummaryQuery<R> {
    pub fn new(registry: R, params: QueryParameters) -> Self {
        Self { registry, params }
    }

    /// # Errors
    /// Returns [`QueryError::NotFound`] if no product stream matches
    pub async fn execute(&self) -> Result<ProductStreamSummary> {
        self.params.validate(&SPEC)?;
        let conditions = self.params.conditions(CONDITIONS);

        let stream = resolve_product_stream(&self.registry, &conditions).await?;

        let mut count_conditions = Conditions::new();
        count_conditions.insert("ofuri".to_string(), stream.ofuri.clone());
        let latest_component_count = self.registry.count_components(&count_conditions).await?;

        Ok(ProductStreamSummary {
            all_components_link: api_link(
                self.registry.base_url(),
                &format!(
                    "api/v1/components?product_streams={}&include_fields=link,name,purl",
                    urlencoding::encode(&stream.ofuri)
                ),
            ),
            product: stream.product_name().map(str::to_string),
            product_version: stream.product_version_name().map(str::to_string),
            brew_tags: stream.brew_tag_names(),
            link: stream.link,
            ofuri: stream.ofuri,
            name: stream.name,
            build_count: stream.build_count,
            latest_component_count,
            manifest_link: stream.manifest,
            latest_components_link: stream.components,
        })
    }
}

/// Looks up exactly one product stream by name and/or ofuri
///
/// When several streams match, the first by ofuri wins so that repeated runs
/// pick the same one.
///
/// # Errors
/// Returns [`QueryError::NotFound`] if nothing matches
pub(crate) async fn resolve_product_stream<R: ComponentRegistry + ?Sized>(
    registry: &R,
    conditions: &Conditions,
) -> Result<ProductStream> {
    let mut streams = registry.list_product_streams(conditions).await?;
    streams.sort_by(|a, b| a.ofuri.cmp(&b.ofuri));
    if streams.len() > 1 {
        log::debug!(
            "{} product streams match {:?}, using {}",
            streams.len(),
            conditions,
            streams[0].ofuri
        );
    }

    if streams.is_empty() {
        let key: Vec<String> = conditions
            .iter()
            .map(|(field, value)| format!("{}={}", field, value))
            .collect();
        return Err(QueryError::NotFound {
            entity: "product stream".to_string(),
            key: key.join(" "),
        }
        .into());
    }
    Ok(streams.swap_remove(0))
}

#[async_trait(?Send)]
impl<R: ComponentRegistry> Query for ProductStreamSummaryQuery<R> {
    fn spec(&self) -> ParameterSpec {
        SPEC
    }

    async fn run(&self) -> Result<QueryOutput> {
        let summary = self.execute().await?;
        QueryOutput::record(ResultView::ProductStreamSummary, &summary)
    }
}
