//! Presentation model
//!
//! The merged tree is wrapped into a single root list holding one list per
//! section, each holding its merged content items.

use super::tree::{LanguageMap, Section};
use serde::Serialize;

/// Title of the root list
pub const ROOT_TITLE: &str = "REKListan";

/// A merged leaf entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub title: String,
    pub content: LanguageMap<String>,
    pub order: LanguageMap<usize>,
    pub id: String,
}

impl ContentItem {
    /// Languages this item has content for
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.content.keys().map(String::as_str)
    }
}

/// A merged section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionList {
    pub title: String,
    pub id: String,
    pub is_section: bool,
    pub items: Vec<ContentItem>,
}

/// Root of the view-model handed to rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RekDataList {
    pub title: String,
    pub lists: Vec<SectionList>,
}

impl RekDataList {
    /// Wrap a merged tree
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let lists = sections
            .into_iter()
            .map(|section| SectionList {
                title: section.title,
                id: section.id,
                is_section: true,
                items: section
                    .items
                    .into_iter()
                    .map(|item| ContentItem {
                        title: item.title,
                        content: item.content,
                        order: item.order,
                        id: item.id,
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: ROOT_TITLE.to_string(),
            lists,
        }
    }

    pub fn section(&self, title: &str) -> Option<&SectionList> {
        self.lists.iter().find(|list| list.title == title)
    }

    /// Total number of content items across all sections
    pub fn item_count(&self) -> usize {
        self.lists.iter().map(|list| list.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tree::Item;
    use serde_json::json;

    fn sample() -> Vec<Section> {
        vec![Section {
            title: "Food".to_string(),
            id: "food".to_string(),
            items: vec![Item {
                title: "Pizza".to_string(),
                content: LanguageMap::from([
                    ("en".to_string(), "<p>Pizza</p>".to_string()),
                    ("sv".to_string(), "<p>Pizza</p>".to_string()),
                ]),
                order: LanguageMap::from([("en".to_string(), 0), ("sv".to_string(), 2)]),
                id: "pizza".to_string(),
            }],
        }]
    }

    #[test]
    fn test_wrap_keeps_structure() {
        let root = RekDataList::from_sections(sample());

        assert_eq!(root.title, ROOT_TITLE);
        assert_eq!(root.lists.len(), 1);
        assert_eq!(root.item_count(), 1);

        let food = root.section("Food").unwrap();
        assert!(food.is_section);
        assert_eq!(food.items[0].languages().collect::<Vec<_>>(), vec!["en", "sv"]);
        assert!(root.section("Drinks").is_none());
    }

    #[test]
    fn test_serializes_for_rendering() {
        let root = RekDataList::from_sections(sample());
        let value = serde_json::to_value(&root).unwrap();

        assert_eq!(value["title"], "REKListan");
        assert_eq!(value["lists"][0]["isSection"], true);
        assert_eq!(value["lists"][0]["items"][0]["order"], json!({"en": 0, "sv": 2}));
    }
}
