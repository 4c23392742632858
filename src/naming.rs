//! URL-safe identifiers for titles and image paths.
//!
//! Section and item ids, as well as cached image filenames, are derived from
//! free text with [`make_url_safe`]:
//! - `"Food & Drink"` → `"food-drink"`
//! - `"/img/a.png"` → `"img-a-png"`
//! - `"Läkemedel"` → `"läkemedel"`

/// Lowercase alphanumerics, with every other run of characters collapsed to
/// a single dash. Leading and trailing dashes are dropped.
pub fn make_url_safe(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    out
}
