use crate::shared::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Which question a result answers
///
/// Formatters use it to choose a layout; the JSON body does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultView {
    ProductVersionsAffectedByCve,
    ProductsContainComponent,
    ProductStreamSummary,
    ComponentsContainComponent,
    ComponentsAffectedByCve,
    ComponentList,
    Component,
    ProductStreamList,
    ProductStream,
    Manifest,
    FlawList,
    Flaw,
    AffectList,
    Affect,
    TrackerList,
    Tracker,
}

impl ResultView {
    /// Title used by the table layout
    pub fn title(&self) -> &'static str {
        match self {
            ResultView::ProductVersionsAffectedByCve => "Product versions affected by CVE",
            ResultView::ProductsContainComponent => "Products containing component",
            ResultView::ProductStreamSummary => "Product stream summary",
            ResultView::ComponentsContainComponent => "Components containing component",
            ResultView::ComponentsAffectedByCve => "Components affected by CVE",
            ResultView::ComponentList => "Components",
            ResultView::Component => "Component",
            ResultView::ProductStreamList => "Product streams",
            ResultView::ProductStream => "Product stream",
            ResultView::Manifest => "Manifest",
            ResultView::FlawList => "Flaws",
            ResultView::Flaw => "Flaw",
            ResultView::AffectList => "Affects",
            ResultView::Affect => "Affect",
            ResultView::TrackerList => "Trackers",
            ResultView::Tracker => "Tracker",
        }
    }
}

/// Normalized result handed from a query to the presentation layer
///
/// List-shaped results become `{"results": [...], "count": n}`; anything
/// else is kept as the JSON object it serializes to.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    view: ResultView,
    body: Value,
}

impl QueryOutput {
    /// Normalizes a single record
    pub fn record<T: Serialize + ?Sized>(view: ResultView, record: &T) -> Result<Self> {
        Ok(Self {
            view,
            body: serde_json::to_value(record)?,
        })
    }

    /// Normalizes a list of records into `{results, count}`
    pub fn records<T: Serialize>(view: ResultView, records: &[T]) -> Result<Self> {
        let results = serde_json::to_value(records)?;
        Ok(Self {
            view,
            body: json!({
                "results": results,
                "count": records.len(),
            }),
        })
    }

    pub fn view(&self) -> ResultView {
        self.view
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The list of a list-shaped result
    pub fn results(&self) -> Option<&Vec<Value>> {
        self.body.get("results").and_then(Value::as_array)
    }

    /// True for a list-shaped result without entries
    pub fn is_empty_list(&self) -> bool {
        self.results().is_some_and(Vec::is_empty)
    }

    /// Provenance link of a record result
    pub fn link(&self) -> Option<&str> {
        self.body.get("link").and_then(Value::as_str)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
    }

    #[test]
    fn test_records_are_wrapped_with_count() {
        let output =
            QueryOutput::records(ResultView::ComponentList, &[Row { name: "curl" }, Row { name: "zlib" }])
                .unwrap();
        assert_eq!(output.body()["count"], 2);
        assert_eq!(output.results().unwrap().len(), 2);
        assert!(!output.is_empty_list());
    }

    #[test]
    fn test_empty_records() {
        let output = QueryOutput::records::<Row>(ResultView::FlawList, &[]).unwrap();
        assert!(output.is_empty_list());
        assert_eq!(output.body()["count"], 0);
    }

    #[test]
    fn test_record_passes_through() {
        let output = QueryOutput::record(
            ResultView::Flaw,
            &json!({"link": "https://incidents.example.com/osidb/api/v1/flaws/CVE-1", "cve_id": "CVE-1"}),
        )
        .unwrap();
        assert!(output.results().is_none());
        assert!(!output.is_empty_list());
        assert_eq!(
            output.link(),
            Some("https://incidents.example.com/osidb/api/v1/flaws/CVE-1")
        );
    }

    #[test]
    fn test_to_json_pretty_is_stable() {
        let output = QueryOutput::records(ResultView::ComponentList, &[Row { name: "curl" }]).unwrap();
        assert_eq!(output.to_json_pretty().unwrap(), output.to_json_pretty().unwrap());
        assert!(output.to_json_pretty().unwrap().contains("\"name\": \"curl\""));
    }
}
