//! Search over the recipe collection.

use crate::models::Recipe;

/// Filters recipes by a case-insensitive substring query against name,
/// cuisine, and individual ingredients. Instructions and difficulty are
/// deliberately not searched.
///
/// A blank query (empty or whitespace-only) returns the whole collection.
/// Input order is preserved; no re-sorting happens here. An empty result is
/// a normal outcome, not an error.
pub fn filter<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    if query.trim().is_empty() {
        return recipes.iter().collect();
    }

    let needle = query.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| {
            contains_insensitive(&recipe.name, &needle)
                || contains_insensitive(&recipe.cuisine, &needle)
                || recipe
                    .ingredients
                    .iter()
                    .any(|ingredient| contains_insensitive(ingredient, &needle))
        })
        .collect()
}

// `needle` is already lowercased by the caller.
fn contains_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
