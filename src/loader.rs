//! View-model loader
//!
//! Runs one load cycle: templates are fetched and registered, content is
//! fetched and turned into one tree per language, the trees are merged,
//! remote images found in the merged content are queued, and the result is
//! wrapped for rendering. Stylesheets are registered last.

use crate::config::HostConfig;
use crate::content::{build_tree, merge_trees, RekDataList, Section};
use crate::images::{remote_image_paths, ImageQueue, ImageRequest};
use crate::resource::{Payload, PayloadKind, Registration, ResourceDef, ResourceFetcher};
use crate::templates::TemplateRegistry;
use anyhow::{Context, Result};
use std::path::Path;

/// Bundled scripts registered before each load, as (name, file name)
pub const IN_APP_RESOURCES: &[(&str, &str)] = &[
    ("jquery", "jquery.js"),
    ("details-js", "details-js.js"),
];

/// Drives a load cycle against its collaborators
pub struct ViewModelLoader<'a> {
    fetcher: &'a ResourceFetcher,
    templates: &'a mut dyn TemplateRegistry,
    images: &'a mut dyn ImageQueue,
    host: &'a dyn HostConfig,
    clear_image_cache_on_load: bool,
}

impl<'a> ViewModelLoader<'a> {
    pub fn new(
        fetcher: &'a ResourceFetcher,
        templates: &'a mut dyn TemplateRegistry,
        images: &'a mut dyn ImageQueue,
        host: &'a dyn HostConfig,
    ) -> Self {
        Self {
            fetcher,
            templates,
            images,
            host,
            clear_image_cache_on_load: false,
        }
    }

    pub fn clear_image_cache_on_load(mut self, clear: bool) -> Self {
        self.clear_image_cache_on_load = clear;
        self
    }

    /// Load, merge and wrap the content described by `json`
    pub async fn load_view_model(
        &mut self,
        json: &[ResourceDef],
        templates: &[ResourceDef],
        css: &[ResourceDef],
    ) -> Result<RekDataList> {
        tracing::info!(
            "Loading view model: {} content, {} templates, {} stylesheets",
            json.len(),
            templates.len(),
            css.len()
        );

        self.fetcher
            .load_files(templates, &mut *self.templates, Registration::Template)
            .await
            .context("Failed to load templates")?;

        let resources = self
            .fetcher
            .load_resources(json, PayloadKind::Json)
            .await
            .context("Failed to load content")?;

        let mut trees = Vec::with_capacity(resources.len());
        for resource in &resources {
            let Payload::Json(data) = &resource.data else {
                return Err(anyhow::anyhow!("Content {} is not JSON", resource.name));
            };
            trees.push(build_tree(&resource.name, data, &*self.templates)?);
        }

        let merged = merge_trees(trees);
        tracing::debug!("Merged into {} sections", merged.len());

        if self.clear_image_cache_on_load {
            if let Err(e) = self.images.clear() {
                tracing::warn!("Could not clear image cache: {:#}", e);
            }
        }
        if let Err(e) = self.images.init_known() {
            tracing::warn!("Could not index cached images: {:#}", e);
        }

        let queued = queue_remote_images(&merged, self.host.host(), &mut *self.images);
        tracing::info!("Queued {} images for download", queued);

        let view_model = RekDataList::from_sections(merged);

        // Stylesheets only affect the detail view; a failure here does not
        // invalidate the loaded content.
        if let Err(e) = self
            .fetcher
            .load_files(css, &mut *self.templates, Registration::Css)
            .await
        {
            tracing::warn!("Could not load stylesheets: {:#}", e);
        }

        Ok(view_model)
    }
}

/// Queue every remote image referenced by any language of any item
///
/// Returns the number of requests the queue accepted.
pub fn queue_remote_images(sections: &[Section], host: &str, queue: &mut dyn ImageQueue) -> usize {
    let mut queued = 0;

    for item in sections.iter().flat_map(|section| &section.items) {
        for html in item.content.values() {
            for path in remote_image_paths(html) {
                if queue.queue(ImageRequest::for_path(host, path)) {
                    queued += 1;
                }
            }
        }
    }

    queued
}

/// Read bundled scripts from `dir` and register them
///
/// Missing files are logged and skipped. Returns how many were registered.
pub async fn load_in_app_resources(dir: &Path, registry: &mut dyn TemplateRegistry) -> usize {
    let mut registered = 0;

    for (name, filename) in IN_APP_RESOURCES {
        let path = dir.join(filename);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                registry.register_in_app_resource(name, &content);
                registered += 1;
            }
            Err(e) => {
                tracing::error!("Could not read and register app resource {}: {}", name, e);
            }
        }
    }

    registered
}
