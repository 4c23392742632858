//! Resource Fetcher
//!
//! Loads named resources either from the development resources directory
//! or from the content host.

use super::registry::ResourceDef;
use crate::net::http::HttpClient;
use crate::templates::TemplateRegistry;
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// How a resource body is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Json,
    Text,
}

/// Body of a fetched resource
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Json(_) => None,
        }
    }
}

/// A fetched resource, named after its descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedResource {
    pub name: String,
    pub data: Payload,
}

/// Where the registry should file a fetched text resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Template,
    Css,
}

/// Fetcher settings
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Read from `dev_resources_dir` instead of the host
    pub local_mode: bool,
    pub dev_resources_dir: PathBuf,
    pub host: String,
}

/// Fetches resource batches in local or remote mode
#[derive(Clone)]
pub struct ResourceFetcher {
    config: FetcherConfig,
    http: HttpClient,
}

impl ResourceFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        Ok(Self {
            config,
            http: HttpClient::new()?,
        })
    }

    /// Fetch all resources concurrently, preserving input order
    ///
    /// Any single failure fails the whole batch, in both modes.
    pub async fn load_resources(
        &self,
        resources: &[ResourceDef],
        kind: PayloadKind,
    ) -> Result<Vec<LoadedResource>> {
        let local_mode = self.config.local_mode;
        tracing::debug!(
            "Loading {} resources ({:?}, local_mode={})",
            resources.len(),
            kind,
            local_mode
        );

        try_join_all(resources.iter().map(|resource| async move {
            if local_mode {
                self.load_local(resource, kind).await
            } else {
                self.load_remote(resource, kind).await
            }
        }))
        .await
    }

    async fn load_local(&self, resource: &ResourceDef, kind: PayloadKind) -> Result<LoadedResource> {
        let path = self.config.dev_resources_dir.join(&resource.devel_name);

        match read_local(&path, kind).await {
            Ok(data) => Ok(LoadedResource {
                name: resource.name.clone(),
                data,
            }),
            Err(e) => {
                tracing::error!("Could not load local resource {}: {:#}", resource.name, e);
                Err(e)
            }
        }
    }

    async fn load_remote(&self, resource: &ResourceDef, kind: PayloadKind) -> Result<LoadedResource> {
        let url = resource.resolve_url(&self.config.host)?;

        let data = match kind {
            PayloadKind::Json => Payload::Json(self.http.get_json(&url).await?),
            PayloadKind::Text => Payload::Text(self.http.get_string(&url).await?),
        };

        Ok(LoadedResource {
            name: resource.name.clone(),
            data,
        })
    }

    /// Fetch text resources and register each with the template registry
    pub async fn load_files(
        &self,
        resources: &[ResourceDef],
        registry: &mut dyn TemplateRegistry,
        registration: Registration,
    ) -> Result<()> {
        let files = self.load_resources(resources, PayloadKind::Text).await?;

        for file in files {
            let content = match &file.data {
                Payload::Text(s) => s.as_str(),
                Payload::Json(_) => continue,
            };

            match registration {
                Registration::Template => registry
                    .register_template(&file.name, content)
                    .with_context(|| format!("Failed to register template {}", file.name))?,
                Registration::Css => registry.register_css(&file.name, content),
            }
        }

        Ok(())
    }
}

async fn read_local(path: &Path, kind: PayloadKind) -> Result<Payload> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match kind {
        PayloadKind::Json => {
            let value = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
            Ok(Payload::Json(value))
        }
        PayloadKind::Text => Ok(Payload::Text(text)),
    }
}
