use super::ProductRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named, versioned product release line in the component registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductStream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub link: String,
    pub ofuri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub products: Vec<ProductRef>,
    pub product_versions: Vec<ProductRef>,
    /// Brew tag name to tag metadata; only the names are meaningful to queries
    pub brew_tags: BTreeMap<String, serde_json::Value>,
    pub build_count: u64,
    /// Link to the latest components of this stream
    pub components: String,
    /// Link to the stream manifest
    pub manifest: String,
}

impl ProductStream {
    pub fn product_name(&self) -> Option<&str> {
        self.products.first().map(|p| p.name.as_str())
    }

    pub fn product_version_name(&self) -> Option<&str> {
        self.product_versions.first().map(|p| p.name.as_str())
    }

    pub fn brew_tag_names(&self) -> Vec<String> {
        self.brew_tags.keys().cloned().collect()
    }
}

/// A group of product streams
///
/// Incident database affects name product versions (`ps_module`), which makes
/// this entity the join point between the two services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub link: String,
    pub ofuri: String,
    pub name: String,
    pub product_streams: Vec<ProductRef>,
}

/// Manifests are SPDX documents and are passed through untouched
pub type Manifest = serde_json::Value;
