use serde::{Deserialize, Serialize};

/// Reference to a product, product version or product stream
///
/// The registry embeds these in component and product records instead of the
/// full entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRef {
    pub link: String,
    pub ofuri: String,
    pub name: String,
}

/// Edge of the component graph: a component referenced by link and purl
///
/// A component may be a source of many parents, so references never imply
/// ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentRef {
    pub link: String,
    pub purl: String,
}

/// A build artifact known to the component registry
///
/// `purl` is the natural key. `namespace` tells upstream artifacts apart
/// from rebuilt ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub link: String,
    pub purl: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<ComponentRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub root_components: Vec<ComponentRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub product_streams: Vec<ProductRef>,
}

impl Component {
    /// Reference to this component, as it would appear in another component's sources
    pub fn to_ref(&self) -> ComponentRef {
        ComponentRef {
            link: self.link.clone(),
            purl: self.purl.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_decodes_registry_payload() {
        let json = r#"{
            "uuid": "6b5f0c7e-3f8a-4d0e-9d43-1c8b5f1a2b3c",
            "link": "https://registry.example.com/api/v1/components?purl=pkg:rpm/redhat/curl@7.76.1-26.el9",
            "purl": "pkg:rpm/redhat/curl@7.76.1-26.el9?arch=src",
            "name": "curl",
            "type": "RPM",
            "namespace": "REDHAT",
            "version": "7.76.1",
            "sources": [
                {"link": "https://registry.example.com/api/v1/components?purl=pkg:generic/curl@7.76.1", "purl": "pkg:generic/curl@7.76.1"}
            ],
            "product_streams": [
                {"link": "https://registry.example.com/api/v1/product_streams?ofuri=o:redhat:rhel:9.2.0.z", "ofuri": "o:redhat:rhel:9.2.0.z", "name": "rhel-9.2.0.z"}
            ],
            "unknown_field": 42
        }"#;

        let component: Component = serde_json::from_str(json).unwrap();
        assert_eq!(component.name, "curl");
        assert_eq!(component.component_type.as_deref(), Some("RPM"));
        assert_eq!(component.sources.len(), 1);
        assert_eq!(component.product_streams[0].name, "rhel-9.2.0.z");
        assert!(component.root_components.is_empty());
    }

    #[test]
    fn test_component_serialization_skips_empty_fields() {
        let component = Component {
            link: "https://registry.example.com/c".to_string(),
            purl: "pkg:npm/left-pad@1.3.0".to_string(),
            name: "left-pad".to_string(),
            ..Component::default()
        };

        let value = serde_json::to_value(&component).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("purl"));
        assert!(!object.contains_key("sources"));
        assert!(!object.contains_key("type"));
    }

    #[test]
    fn test_component_to_ref() {
        let component = Component {
            link: "https://registry.example.com/c".to_string(),
            purl: "pkg:npm/left-pad@1.3.0".to_string(),
            ..Component::default()
        };
        assert_eq!(
            component.to_ref(),
            ComponentRef {
                link: "https://registry.example.com/c".to_string(),
                purl: "pkg:npm/left-pad@1.3.0".to_string(),
            }
        );
    }
}
