use super::difficulty::Difficulty;
use super::recipe::Recipe;

/// In-progress field values collected before a save.
///
/// A draft is not a recipe: it has no identity and no creation date, and it
/// may hold values that are not saveable yet. `is_valid` is the single gate
/// the save path checks before touching the store.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image_data: Option<Vec<u8>>,
    pub rating: Option<i32>,
}

impl RecipeDraft {
    /// Starts a draft from an existing recipe, for editing.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            cuisine: recipe.cuisine.clone(),
            difficulty: recipe.difficulty,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            image_data: recipe.image_data.clone(),
            rating: recipe.rating,
        }
    }

    /// Returns true when every save rule holds:
    /// trimmed name and cuisine are non-empty, prep time, cook time and
    /// servings are positive, and at least one ingredient and one
    /// instruction are non-blank after trimming.
    ///
    /// There is no per-field error reporting; the draft is either saveable
    /// or it is not.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.cuisine.trim().is_empty()
            && self.prep_time > 0
            && self.cook_time > 0
            && self.servings > 0
            && has_entry(&self.ingredients)
            && has_entry(&self.instructions)
    }

    /// Ingredients as they will be persisted.
    ///
    /// Drops only entries that are exactly the empty string. Whitespace-only
    /// entries pass through; the validity gate trims, the save filter does
    /// not. Existing catalogs depend on the looser filter, so both checks
    /// stay as they are.
    pub fn saved_ingredients(&self) -> Vec<String> {
        drop_empty(&self.ingredients)
    }

    /// Instructions as they will be persisted. Same filter as ingredients.
    pub fn saved_instructions(&self) -> Vec<String> {
        drop_empty(&self.instructions)
    }
}

fn has_entry(entries: &[String]) -> bool {
    entries.iter().any(|e| !e.trim().is_empty())
}

fn drop_empty(entries: &[String]) -> Vec<String> {
    entries.iter().filter(|e| !e.is_empty()).cloned().collect()
}
