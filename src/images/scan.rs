//! Remote-image reference scanner
//!
//! Rendered content marks images that must be downloaded separately with a
//! `data-remotesrc` attribute holding the original path on the host.

use crate::naming::make_url_safe;
use regex::{CaptureMatches, Regex};
use std::sync::OnceLock;

static REMOTE_SRC: OnceLock<Regex> = OnceLock::new();

fn remote_src_pattern() -> &'static Regex {
    REMOTE_SRC.get_or_init(|| {
        Regex::new(r#"data-remotesrc=["']([^"']+)["']"#)
            .unwrap_or_else(|e| panic!("Invalid remote image pattern: {}", e))
    })
}

/// Lazy sequence of remote image paths in one HTML string
pub struct RemoteImagePaths<'h> {
    matches: CaptureMatches<'static, 'h>,
}

impl<'h> Iterator for RemoteImagePaths<'h> {
    type Item = &'h str;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches
            .next()
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// All non-overlapping `data-remotesrc` values in `html`, in document order
pub fn remote_image_paths(html: &str) -> RemoteImagePaths<'_> {
    RemoteImagePaths {
        matches: remote_src_pattern().captures_iter(html),
    }
}

/// A pending image download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub url: String,
    pub filename: String,
}

impl ImageRequest {
    /// Request for a host-relative image path
    pub fn for_path(host: &str, path: &str) -> Self {
        Self {
            url: format!("{}{}", host, path),
            filename: make_url_safe(path),
        }
    }
}
