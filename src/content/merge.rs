//! Tree merger
//!
//! Combines per-language content trees into one. Sections are matched by
//! title, then their items are matched by title, then the per-language maps
//! of matched items are combined.
//!
//! Ordering follows an insert cursor into the target: a source element that
//! is new to the target is inserted at the cursor, and a matched element
//! moves the cursor to just past its position. The cursor never moves
//! backward.

use super::tree::{Item, Section, Titled};

/// Merge `source` into `target` in order
///
/// `locate` finds the position of a source element in the target, `combine`
/// folds a matched source element into its target counterpart.
pub fn merge_ordered<T, L, C>(
    mut target: Vec<T>,
    source: Vec<T>,
    mut locate: L,
    mut combine: C,
) -> Vec<T>
where
    L: FnMut(&[T], &T) -> Option<usize>,
    C: FnMut(&mut T, T),
{
    let mut insert_index = 0;

    for element in source {
        match locate(&target, &element) {
            Some(found) => {
                combine(&mut target[found], element);
                insert_index = insert_index.max(found + 1);
            }
            None => {
                target.insert(insert_index, element);
                insert_index += 1;
            }
        }
    }

    target
}

/// Position of the first element with the same title (exact match)
pub fn locate_by_title<T: Titled>(haystack: &[T], needle: &T) -> Option<usize> {
    haystack.iter().position(|e| e.title() == needle.title())
}

/// Copy every language of `source` into `target`, overwriting on collision
pub fn merge_item(target: &mut Item, source: Item) {
    let Item { content, order, .. } = source;

    for (language, html) in content {
        if let Some(index) = order.get(&language) {
            target.order.insert(language.clone(), *index);
        }
        target.content.insert(language, html);
    }
}

/// Merge two section lists by title, recursing into their items
pub fn merge_sections(target: Vec<Section>, source: Vec<Section>) -> Vec<Section> {
    merge_ordered(target, source, locate_by_title, |target_section, source_section| {
        let items = std::mem::take(&mut target_section.items);
        target_section.items = merge_ordered(
            items,
            source_section.items,
            locate_by_title,
            merge_item,
        );
    })
}

/// Fold a sequence of trees into one, left to right
///
/// The first tree is taken as-is; each following tree is merged into it.
pub fn merge_trees<I>(trees: I) -> Vec<Section>
where
    I: IntoIterator<Item = Vec<Section>>,
{
    trees
        .into_iter()
        .reduce(merge_sections)
        .unwrap_or_default()
}
