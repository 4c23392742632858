//! Content trees
//!
//! - [`tree`] - Builds one section/item tree per language resource
//! - [`merge`] - Merges the per-language trees into one ordered tree
//! - [`model`] - Presentation nodes wrapping the merged tree

pub mod merge;
pub mod model;
pub mod tree;

pub use merge::{merge_ordered, merge_sections, merge_trees};
pub use model::{ContentItem, RekDataList, SectionList};
pub use tree::{build_tree, Item, LanguageMap, Section};
