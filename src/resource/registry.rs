//! Resource Manifest - static resource descriptors
//!
//! The template, content and stylesheet descriptors are embedded in the
//! binary as JSON and parsed once on first access.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::OnceLock;
use url::Url;

/// Embedded manifest (compiled into the binary)
const MANIFEST_JSON: &str = include_str!("../resources/manifest.json");

/// Descriptor of a fetchable artifact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceDef {
    /// Name the payload is registered or keyed under
    pub name: String,
    /// Absolute URL, or a host-relative path starting with `/`
    pub url: String,
    /// File name under the development resources directory
    pub devel_name: String,
}

impl ResourceDef {
    pub fn new(name: &str, url: &str, devel_name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            devel_name: devel_name.to_string(),
        }
    }

    /// Resolve the remote URL against a host
    ///
    /// Absolute URLs are returned unchanged. Host-relative paths are appended
    /// to the host as-is, so a base path on the host is kept, the same way
    /// image URLs are built.
    pub fn resolve_url(&self, host: &str) -> Result<String> {
        if let Ok(absolute) = Url::parse(&self.url) {
            return Ok(absolute.to_string());
        }

        Url::parse(host).with_context(|| format!("Invalid host URL: {}", host))?;
        let joined = Url::parse(&format!("{}{}", host, self.url))
            .with_context(|| format!("Invalid resource URL: {}", self.url))?;
        Ok(joined.to_string())
    }
}

/// Root structure of resources/manifest.json
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResourceManifest {
    #[serde(default)]
    pub templates: Vec<ResourceDef>,
    #[serde(default)]
    pub json: Vec<ResourceDef>,
    #[serde(default)]
    pub css: Vec<ResourceDef>,
}

/// Global manifest loaded from JSON
static MANIFEST: OnceLock<ResourceManifest> = OnceLock::new();

/// Get the resource manifest (loads from embedded JSON on first access)
pub fn manifest() -> &'static ResourceManifest {
    MANIFEST.get_or_init(|| {
        serde_json::from_str(MANIFEST_JSON)
            .unwrap_or_else(|e| panic!("Failed to parse embedded resource manifest: {}", e))
    })
}
