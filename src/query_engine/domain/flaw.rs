use serde::{Deserialize, Serialize};

/// A tracked security issue in the incident database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flaw {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    pub affects: Vec<Affect>,
}

impl Flaw {
    /// The CVE id when assigned, otherwise the internal uuid
    pub fn identifier(&self) -> &str {
        self.cve_id.as_deref().unwrap_or(&self.uuid)
    }
}

/// Links a flaw to a product module and component by name
///
/// `ps_module` and `ps_component` are free text; they are matched against
/// registry product versions and components by name, never by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Affect {
    pub uuid: String,
    /// Parent flaw uuid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flaw: Option<String>,
    pub ps_module: String,
    pub ps_component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affectedness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracker {
    pub uuid: String,
    pub external_system_id: String,
    #[serde(rename = "type")]
    pub tracker_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps_update_stream: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flaw_decodes_with_affects() {
        let json = r#"{
            "uuid": "2f5c3a8e-9d41-4e7a-8a5d-0c1b2d3e4f50",
            "cve_id": "CVE-2023-38545",
            "title": "curl: heap based buffer overflow in the SOCKS5 proxy handshake",
            "description": "A heap based buffer overflow flaw was found.",
            "impact": "IMPORTANT",
            "affects": [
                {"uuid": "a1", "ps_module": "rhel-9", "ps_component": "curl", "affectedness": "AFFECTED"},
                {"uuid": "a2", "ps_module": "rhel-8", "ps_component": "curl"}
            ]
        }"#;

        let flaw: Flaw = serde_json::from_str(json).unwrap();
        assert_eq!(flaw.identifier(), "CVE-2023-38545");
        assert_eq!(flaw.affects.len(), 2);
        assert_eq!(flaw.affects[0].affectedness.as_deref(), Some("AFFECTED"));
        assert!(flaw.affects[1].affectedness.is_none());
    }

    #[test]
    fn test_flaw_identifier_falls_back_to_uuid() {
        let flaw = Flaw {
            uuid: "2f5c3a8e".to_string(),
            ..Flaw::default()
        };
        assert_eq!(flaw.identifier(), "2f5c3a8e");
    }

    #[test]
    fn test_tracker_type_field_rename() {
        let tracker: Tracker =
            serde_json::from_str(r#"{"uuid": "t1", "external_system_id": "RHSA-1", "type": "JIRA", "status": "Closed"}"#)
                .unwrap();
        assert_eq!(tracker.tracker_type, "JIRA");
        let value = serde_json::to_value(&tracker).unwrap();
        assert_eq!(value["type"], "JIRA");
    }
}
