//! Content-tree builder
//!
//! Turns one fetched language resource into sections of titled items.

use crate::naming::make_url_safe;
use crate::templates::TemplateRegistry;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Per-language values keyed by language (resource) name
pub type LanguageMap<V> = BTreeMap<String, V>;

/// A titled grouping of items in one content tree
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub id: String,
    pub items: Vec<Item>,
}

/// A titled leaf with rendered content and ordering per language
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub title: String,
    pub content: LanguageMap<String>,
    pub order: LanguageMap<usize>,
    pub id: String,
}

/// Anything the merger can match by title
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for Section {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for Item {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Section as delivered by the content host
#[derive(Debug, Deserialize)]
struct RawSection {
    title: String,
    fields: Vec<Value>,
}

/// Heading of a raw field, if it has a non-empty one
fn field_heading(field: &Value) -> Option<&str> {
    field
        .get("value")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Build the content tree for one language
///
/// Each field is rendered through the template registered under `language`.
/// Fields without a heading are dropped.
pub fn build_tree(
    language: &str,
    data: &Value,
    templates: &dyn TemplateRegistry,
) -> Result<Vec<Section>> {
    let raw = Vec::<RawSection>::deserialize(data)
        .with_context(|| format!("Malformed content for {}", language))?;

    raw.into_iter()
        .map(|section| -> Result<Section> {
            let mut items = Vec::new();

            for (index, field) in section.fields.iter().enumerate() {
                let Some(heading) = field_heading(field) else {
                    continue;
                };

                let html = templates.process_template(
                    language,
                    &json!({
                        "fields": [field],
                        "isMobile": true,
                    }),
                )?;

                items.push(Item {
                    title: heading.to_string(),
                    content: LanguageMap::from([(language.to_string(), html)]),
                    order: LanguageMap::from([(language.to_string(), index)]),
                    id: make_url_safe(heading),
                });
            }

            Ok(Section {
                id: make_url_safe(&section.title),
                title: section.title,
                items,
            })
        })
        .collect()
}
