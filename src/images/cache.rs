//! Image cache and download queue

use super::scan::ImageRequest;
use anyhow::{Context, Result};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

/// Queue the loader hands discovered images to
pub trait ImageQueue {
    /// Remove every cached image
    fn clear(&mut self) -> Result<()>;

    /// Index the images already present in the cache
    fn init_known(&mut self) -> Result<()>;

    /// Queue an image unless it is cached or already queued
    ///
    /// Returns whether the request was added.
    fn queue(&mut self, request: ImageRequest) -> bool;
}

/// [`ImageQueue`] backed by a cache directory
#[derive(Debug)]
pub struct ImageCache {
    dir: PathBuf,
    known: HashSet<String>,
    pending: VecDeque<ImageRequest>,
    pending_names: HashSet<String>,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            known: HashSet::new(),
            pending: VecDeque::new(),
            pending_names: HashSet::new(),
        }
    }

    pub fn is_known(&self, filename: &str) -> bool {
        self.known.contains(filename)
    }

    pub fn pending(&self) -> impl Iterator<Item = &ImageRequest> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Take every pending request, oldest first
    pub fn drain(&mut self) -> Vec<ImageRequest> {
        self.pending_names.clear();
        self.pending.drain(..).collect()
    }
}

impl ImageQueue for ImageCache {
    fn clear(&mut self) -> Result<()> {
        tracing::info!("Clearing image cache {:?}", self.dir);

        if self.dir.exists() {
            std::fs::remove_dir_all(&self.dir)
                .with_context(|| format!("Failed to clear image cache {}", self.dir.display()))?;
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create image cache {}", self.dir.display()))?;

        self.known.clear();
        Ok(())
    }

    fn init_known(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create image cache {}", self.dir.display()))?;

        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read image cache {}", self.dir.display()))?;

        self.known.clear();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    self.known.insert(name.to_string());
                }
            }
        }

        tracing::debug!("{} cached images known", self.known.len());
        Ok(())
    }

    fn queue(&mut self, request: ImageRequest) -> bool {
        if self.known.contains(&request.filename) || self.pending_names.contains(&request.filename) {
            return false;
        }

        tracing::debug!("Queueing image {} -> {}", request.url, request.filename);
        self.pending_names.insert(request.filename.clone());
        self.pending.push_back(request);
        true
    }
}
