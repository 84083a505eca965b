use super::PurlDisplay;
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use serde_json::Value;

/// TableFormatter adapter rendering results as a Markdown table
///
/// List results get one row per entry and one column per scalar field of
/// the first entry. Records become a two-column field/value table. The two
/// nested views flatten their children into rows.
pub struct TableFormatter {
    purls: PurlDisplay,
}

type Table = (Vec<String>, Vec<Vec<String>>);

/// Columns whose values are package URLs
const PURL_COLUMNS: &[&str] = &["purl", "component_purl", "source"];

impl TableFormatter {
    pub fn new(show_purl: bool) -> Self {
        Self {
            purls: PurlDisplay::new(show_purl),
        }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn cell(&self, column: &str, value: Option<&Value>) -> String {
        let rendered = match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) if PURL_COLUMNS.contains(&column) => self.purls.component(s),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Object(_) => item
                        .get("purl")
                        .or_else(|| item.get("name"))
                        .or_else(|| item.get("uuid"))
                        .and_then(Value::as_str)
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| item.to_string()),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Some(other) => other.to_string(),
        };
        Self::escape_cell(&rendered)
    }

    fn list_table(&self, rows: &[Value]) -> Table {
        let headers: Vec<String> = rows
            .first()
            .and_then(Value::as_object)
            .map(|first| {
                first
                    .iter()
                    .filter(|(_, value)| !value.is_object())
                    .map(|(key, _)| key.clone())
                    .collect()
            })
            .unwrap_or_default();

        let body = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|column| self.cell(column, row.get(column)))
                    .collect()
            })
            .collect();
        (headers, body)
    }

    fn record_table(&self, record: &Value) -> Table {
        let body = record
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .map(|(key, value)| vec![Self::escape_cell(key), self.cell(key, Some(value))])
                    .collect()
            })
            .unwrap_or_default();
        (vec!["Field".to_string(), "Value".to_string()], body)
    }

    fn source_table(&self, output: &QueryOutput) -> Table {
        let components: Vec<&Value> = match output.results() {
            Some(rows) => rows.iter().collect(),
            None => vec![output.body()],
        };
        let body = components
            .into_iter()
            .flat_map(|component| {
                let purl = component.get("purl");
                component
                    .get("sources")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .map(move |source| {
                        vec![
                            self.cell("source", source.get("purl")),
                            self.cell("purl", purl),
                        ]
                    })
            })
            .collect();
        (vec!["Source Component".to_string(), "Component".to_string()], body)
    }

    fn affected_component_table(&self, record: &Value) -> Table {
        let affects = record
            .get("affects")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let body = affects
            .iter()
            .flat_map(|affect| {
                affect
                    .get("components")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .map(move |component| {
                        vec![
                            self.cell("product_version_name", affect.get("product_version_name")),
                            self.cell("component_name", affect.get("component_name")),
                            self.cell("affectedness", affect.get("affectedness")),
                            self.cell("purl", component.get("purl")),
                        ]
                    })
            })
            .collect();
        (
            ["Product Version", "Component Name", "Affectedness", "Component"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            body,
        )
    }

    fn render(title: &str, (headers, rows): Table) -> String {
        let mut output = format!("## {}\n\n", title);
        output.push_str(&format!("| {} |\n", headers.join(" | ")));
        output.push_str(&format!(
            "|{}|\n",
            headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        ));
        for row in rows {
            output.push_str(&format!("| {} |\n", row.join(" | ")));
        }
        output
    }
}

impl ResultFormatter for TableFormatter {
    fn format(&self, output: &QueryOutput) -> Result<String> {
        if output.is_empty_list() {
            return Ok("No results\n".to_string());
        }

        let table = match (output.view(), output.results()) {
            (ResultView::ComponentsContainComponent, _) => self.source_table(output),
            (ResultView::ComponentsAffectedByCve, _) => self.affected_component_table(output.body()),
            (_, Some(rows)) => self.list_table(rows),
            (_, None) => self.record_table(output.body()),
        };

        if table.1.is_empty() {
            return Ok("No results\n".to_string());
        }
        Ok(Self::render(output.view().title(), table))
    }
}
