//! Resource loader for REK content
//!
//! Fetches templates and per-language content either from the content host
//! or from a local development directory, merges the per-language trees into
//! one view-model and queues the remote images the content refers to.
//!
//! # Module Structure
//!
//! - [`resource`] - Resource descriptors and the fetcher
//! - [`content`] - Content-tree building, merging and presentation nodes
//! - [`images`] - Remote image markers and the image cache
//! - [`templates`] - Template registry backed by handlebars
//! - [`loader`] - The load pipeline tying it all together
//! - [`net`] - HTTP client and load error classification
//! - [`config`] - Persistent configuration

pub mod config;
pub mod content;
pub mod images;
pub mod loader;
pub mod naming;
pub mod net;
pub mod resource;
pub mod templates;

pub use config::{Config, HostConfig};
pub use loader::ViewModelLoader;
