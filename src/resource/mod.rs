//! Resource loading layer
//!
//! # Architecture
//!
//! - [`registry`] - Static resource descriptors embedded from `src/resources/manifest.json`
//! - [`fetcher`] - Fetches descriptor batches from local files or the content host
//!
//! # Example
//!
//! ```ignore
//! use rek_loader::resource::{manifest, PayloadKind, ResourceFetcher};
//!
//! async fn load(fetcher: &ResourceFetcher) -> anyhow::Result<()> {
//!     let content = fetcher.load_resources(&manifest().json, PayloadKind::Json).await?;
//!     Ok(())
//! }
//! ```

mod fetcher;
mod registry;

pub use fetcher::{
    FetcherConfig, LoadedResource, Payload, PayloadKind, Registration, ResourceFetcher,
};
pub use registry::*;
