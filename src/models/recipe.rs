use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::difficulty::Difficulty;
use super::draft::RecipeDraft;
use crate::timefmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub prep_time: i32, // minutes
    pub cook_time: i32, // minutes
    pub servings: i32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub date_added: DateTime<Utc>,
    #[serde(with = "serde_bytes", default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

impl Recipe {
    /// Creates a new recipe from a draft, assigning a fresh id and creation
    /// date. The caller is expected to have checked `draft.is_valid()`.
    pub fn from_draft(draft: &RecipeDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            cuisine: draft.cuisine.clone(),
            difficulty: draft.difficulty,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            ingredients: draft.saved_ingredients(),
            instructions: draft.saved_instructions(),
            date_added: Utc::now(),
            image_data: draft.image_data.clone(),
            rating: draft.rating,
        }
    }

    /// Overwrites every field from the draft except `id` and `date_added`,
    /// which never change once the recipe exists.
    pub fn apply_draft(&mut self, draft: &RecipeDraft) {
        self.name = draft.name.clone();
        self.cuisine = draft.cuisine.clone();
        self.difficulty = draft.difficulty;
        self.prep_time = draft.prep_time;
        self.cook_time = draft.cook_time;
        self.servings = draft.servings;
        self.ingredients = draft.saved_ingredients();
        self.instructions = draft.saved_instructions();
        self.image_data = draft.image_data.clone();
        self.rating = draft.rating;
    }

    /// Derived, never stored. Recomputed on every read so it can't drift
    /// from the current prep and cook values.
    pub fn total_time(&self) -> i32 {
        self.prep_time + self.cook_time
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;

        writeln!(
            f,
            "{} | {} {} | {} | serves {}",
            self.cuisine,
            self.difficulty.label(),
            self.difficulty.emoji(),
            timefmt::format_duration(self.total_time()),
            self.servings
        )?;
        writeln!(
            f,
            "Prep: {} min, Cook: {} min",
            self.prep_time, self.cook_time
        )?;

        if let Some(rating) = self.rating {
            writeln!(f, "Rating: {}/5", rating)?;
        }

        if let Some(image) = &self.image_data {
            writeln!(f, "Photo: {} bytes", image.len())?;
        }

        writeln!(f, "\nIngredients:")?;
        for ingredient in &self.ingredients {
            writeln!(f, "  - {}", ingredient)?;
        }

        writeln!(f, "\nInstructions:")?;
        for (i, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, instruction)?;
        }

        writeln!(f, "\nAdded: {}", self.date_added.format("%Y-%m-%d"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: "Classic Lasagna".to_string(),
            cuisine: "Italian".to_string(),
            difficulty: Difficulty::Medium,
            prep_time: 30,
            cook_time: 60,
            servings: 6,
            ingredients: vec!["12 lasagna noodles".to_string(), "500g ground beef".to_string()],
            instructions: vec!["Preheat oven to 375°F.".to_string(), "Bake.".to_string()],
            image_data: None,
            rating: None,
        }
    }

    #[test]
    fn test_from_draft_assigns_identity() {
        let a = Recipe::from_draft(&draft());
        let b = Recipe::from_draft(&draft());
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Classic Lasagna");
        assert_eq!(a.ingredients.len(), 2);
    }

    #[test]
    fn test_total_time() {
        let recipe = Recipe::from_draft(&draft());
        assert_eq!(recipe.total_time(), 90);
    }

    #[test]
    fn test_total_time_tracks_current_fields() {
        let mut recipe = Recipe::from_draft(&draft());
        recipe.prep_time = 10;
        recipe.cook_time = 15;
        assert_eq!(recipe.total_time(), 25);
    }

    #[test]
    fn test_apply_draft_keeps_id_and_date() {
        let mut recipe = Recipe::from_draft(&draft());
        let id = recipe.id;
        let date_added = recipe.date_added;

        let mut edited = draft();
        edited.name = "Lasagna al Forno".to_string();
        edited.servings = 8;
        edited.rating = Some(5);
        recipe.apply_draft(&edited);

        assert_eq!(recipe.id, id);
        assert_eq!(recipe.date_added, date_added);
        assert_eq!(recipe.name, "Lasagna al Forno");
        assert_eq!(recipe.servings, 8);
        assert_eq!(recipe.rating, Some(5));
    }

    #[test]
    fn test_save_drops_raw_empty_entries() {
        let mut d = draft();
        d.ingredients = vec![
            "2 cups flour".to_string(),
            "".to_string(),
            "  ".to_string(),
        ];
        let recipe = Recipe::from_draft(&d);
        assert_eq!(recipe.ingredients, vec!["2 cups flour", "  "]);
    }

    #[test]
    fn test_recipe_json_roundtrip() {
        let mut recipe = Recipe::from_draft(&draft());
        recipe.image_data = Some(vec![0xFF, 0xD8, 0xFF]);
        recipe.rating = Some(4);

        let json = serde_json::to_string(&recipe).unwrap();
        let parsed: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe, parsed);
    }

    #[test]
    fn test_recipe_display() {
        let recipe = Recipe::from_draft(&draft());
        let output = format!("{}", recipe);
        assert!(output.contains("Classic Lasagna"));
        assert!(output.contains("Italian"));
        assert!(output.contains("1h 30 min"));
        assert!(output.contains("serves 6"));
        assert!(output.contains("1. Preheat oven"));
    }
}
