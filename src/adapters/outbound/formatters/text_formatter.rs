use super::PurlDisplay;
use crate::application::dto::{QueryOutput, ResultView};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use owo_colors::{OwoColorize, Style};
use serde_json::Value;

/// TextFormatter adapter printing one line per entry
///
/// Each view has its own line layout. Records without a dedicated layout
/// print as `key : value` lines.
pub struct TextFormatter {
    color: bool,
    purls: PurlDisplay,
}

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl TextFormatter {
    /// # Arguments
    /// * `color` - Emit ANSI colours
    /// * `show_purl` - Print purls verbatim instead of the short form
    pub fn new(color: bool, show_purl: bool) -> Self {
        Self {
            color,
            purls: PurlDisplay::new(show_purl),
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, Style::new().magenta().bold())
    }

    fn key_values(&self, body: &Value, out: &mut Vec<String>) {
        if let Some(object) = body.as_object() {
            for (key, value) in object {
                let rendered = match value {
                    Value::Array(_) | Value::Object(_) => value.to_string(),
                    other => scalar(other),
                };
                out.push(format!("{} : {}", self.heading(key), rendered));
            }
        }
    }

    fn product_versions_affected(&self, body: &Value, out: &mut Vec<String>) {
        out.push(format!("link: {}", text(body, "link")));
        out.push(format!("cve_id: {}", self.heading(text(body, "cve_id"))));
        out.push(format!("title: {}", text(body, "title")));
        out.push("product_versions:".to_string());
        for version in list(body, "product_versions") {
            out.push(text(version, "name").to_string());
        }
    }

    fn products_containing(&self, rows: &[Value], out: &mut Vec<String>) {
        for row in rows {
            if row.get("component_purl").is_none() {
                out.push(self.paint(text(row, "ofuri"), Style::new().magenta().bold().underline()));
                continue;
            }

            let component = format!("({})", self.purls.component(text(row, "component_purl")));
            let roots = list(row, "component_root_components");
            let related_url = text(row, "component_related_url");
            let stream = self.paint(text(row, "name"), Style::new().magenta().bold().underline());

            let mut root_names: Vec<String> = roots
                .iter()
                .filter_map(Value::as_str)
                .map(|purl| self.purls.name_version_of(purl))
                .collect();
            if root_names.is_empty() {
                root_names.push("none".to_string());
            }
            for root in root_names {
                let line = format!("{} {} {} {}", stream, root, component, related_url);
                out.push(line.trim_end().to_string());
            }
        }
    }

    fn sources_of(&self, component: &Value, out: &mut Vec<String>) {
        let display = format!("({})", self.purls.component(text(component, "purl")));
        for source in list(component, "sources") {
            let source_name = self.paint(
                &self.purls.name_version_of(text(source, "purl")),
                Style::new().magenta().underline(),
            );
            out.push(format!("{} {}", source_name, display));
        }
    }

    fn components_containing(&self, output: &QueryOutput, out: &mut Vec<String>) {
        out.push("source component | component".to_string());
        match output.results() {
            Some(rows) => rows.iter().for_each(|row| self.sources_of(row, out)),
            None => self.sources_of(output.body(), out),
        }
    }

    fn components_affected(&self, body: &Value, out: &mut Vec<String>) {
        out.push(format!("Flaw Title: {}", text(body, "title")));
        out.push("affects:".to_string());
        for affect in list(body, "affects") {
            let version = self.heading(text(affect, "product_version_name"));
            let components = list(affect, "components");
            if components.is_empty() {
                out.push(format!("{} {} (no components)", version, text(affect, "component_name")));
            }
            for component in components {
                let purl = text(component, "purl");
                out.push(format!(
                    "{} {} ({})",
                    version,
                    self.paint(&PurlDisplay::namespace_of(purl), Style::new().cyan().bold()),
                    self.purls.component(purl)
                ));
            }
        }
    }

    fn component_rows(&self, rows: &[Value], out: &mut Vec<String>) {
        for row in rows {
            let purl = text(row, "purl");
            let related_url = text(row, "related_url");
            let line = format!(
                "{} {}",
                self.paint(&self.purls.component(purl), Style::new().bold()),
                related_url
            );
            out.push(line.trim_end().to_string());
        }
    }

    fn manifest(&self, body: &Value, out: &mut Vec<String>) {
        let locators: Vec<&str> = list(body, "packages")
            .iter()
            .filter_map(|package| {
                list(package, "externalRefs")
                    .first()
                    .map(|reference| text(reference, "referenceLocator"))
            })
            .filter(|locator| !locator.is_empty())
            .collect();

        if locators.is_empty() {
            self.key_values(body, out);
        } else {
            out.extend(locators.into_iter().map(str::to_string));
        }
    }

    fn rows(&self, rows: &[Value], columns: &[&str], highlight: &str, out: &mut Vec<String>) {
        for row in rows {
            let fields: Vec<String> = columns
                .iter()
                .map(|column| match row.get(*column) {
                    Some(value) if *column == highlight => self.heading(&scalar(value)),
                    Some(value) => scalar(value),
                    None => String::new(),
                })
                .collect();
            out.push(fields.join(" ").trim_end().to_string());
        }
    }
}

impl ResultFormatter for TextFormatter {
    fn format(&self, output: &QueryOutput) -> Result<String> {
        if output.is_empty_list() {
            return Ok("No results\n".to_string());
        }

        let body = output.body();
        let rows = output.results().map(Vec::as_slice).unwrap_or_default();
        let mut lines = Vec::new();

        match output.view() {
            ResultView::ProductVersionsAffectedByCve => {
                self.product_versions_affected(body, &mut lines)
            }
            ResultView::ProductsContainComponent => self.products_containing(rows, &mut lines),
            ResultView::ComponentsContainComponent => {
                self.components_containing(output, &mut lines)
            }
            ResultView::ComponentsAffectedByCve => self.components_affected(body, &mut lines),
            ResultView::ComponentList => self.component_rows(rows, &mut lines),
            ResultView::ProductStreamList => self.rows(rows, &["name", "ofuri"], "name", &mut lines),
            ResultView::FlawList => self.rows(
                rows,
                &["cve_id", "title", "state", "impact", "resolution"],
                "cve_id",
                &mut lines,
            ),
            ResultView::AffectList => self.rows(
                rows,
                &["ps_module", "ps_component", "affectedness", "resolution"],
                "ps_module",
                &mut lines,
            ),
            ResultView::TrackerList => self.rows(
                rows,
                &["external_system_id", "type", "status"],
                "external_system_id",
                &mut lines,
            ),
            ResultView::Manifest => self.manifest(body, &mut lines),
            ResultView::ProductStreamSummary
            | ResultView::Component
            | ResultView::ProductStream
            | ResultView::Flaw
            | ResultView::Affect
            | ResultView::Tracker => self.key_values(body, &mut lines),
        }

        let mut rendered = lines.join("\n");
        rendered.push('\n');
        Ok(rendered)
    }
}
