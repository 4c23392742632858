//! Remote images referenced from rendered content
//!
//! - [`scan`] - Finds `data-remotesrc` markers in content HTML
//! - [`cache`] - Cache directory and queue of pending downloads

pub mod cache;
pub mod scan;

pub use cache::{ImageCache, ImageQueue};
pub use scan::{remote_image_paths, ImageRequest, RemoteImagePaths};
