use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::OutputFormat;
use crate::catalog;
use crate::db::RecipeRepository;
use crate::models::{Difficulty, Recipe, RecipeDraft};
use crate::timefmt;

const NOT_SAVEABLE: &str = "Recipe is incomplete. A recipe needs a name, a cuisine, \
positive prep/cook times and servings, and at least one ingredient and one instruction step.";

#[derive(Args)]
pub struct AddCommand {
    /// Recipe name
    name: String,

    /// Cuisine, e.g. Italian
    #[arg(long)]
    cuisine: String,

    /// Difficulty level
    #[arg(long, value_enum, default_value = "easy")]
    difficulty: Difficulty,

    /// Prep time in minutes
    #[arg(long)]
    prep_time: i32,

    /// Cook time in minutes
    #[arg(long)]
    cook_time: i32,

    /// Number of servings
    #[arg(long)]
    servings: i32,

    /// Ingredient (can be repeated, order is kept)
    #[arg(long = "ingredient", value_name = "INGREDIENT")]
    ingredients: Vec<String>,

    /// Instruction step (can be repeated, order is kept)
    #[arg(long = "instruction", value_name = "STEP")]
    instructions: Vec<String>,

    /// Path to a photo to attach
    #[arg(long)]
    image: Option<PathBuf>,

    /// Star rating, 1 to 5
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    rating: Option<i32>,
}

impl AddCommand {
    pub async fn run(&self, repo: &RecipeRepository) -> Result<(), Box<dyn std::error::Error>> {
        let image_data = load_image(&self.image).await?;

        let draft = RecipeDraft {
            name: self.name.clone(),
            cuisine: self.cuisine.clone(),
            difficulty: self.difficulty,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            image_data,
            rating: self.rating,
        };

        if !draft.is_valid() {
            return Err(NOT_SAVEABLE.into());
        }

        let recipe = Recipe::from_draft(&draft);
        repo.insert(&recipe).await?;

        println!("Created recipe {}:", recipe.id);
        println!("{}", recipe);
        Ok(())
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Filter by name, cuisine, or ingredient (case-insensitive)
    #[arg(long, short)]
    search: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ListCommand {
    pub async fn run(&self, repo: &RecipeRepository) -> Result<(), Box<dyn std::error::Error>> {
        let recipes = repo.query_all().await?;
        let query = self.search.as_deref().unwrap_or("");
        let filtered = catalog::filter(&recipes, query);

        if filtered.is_empty() {
            if recipes.is_empty() {
                println!("No recipes yet. Add your first recipe to start cooking!");
            } else {
                println!("No recipes match '{}'", query.trim());
            }
            return Ok(());
        }

        match &self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&filtered)?);
            }
            OutputFormat::Text => {
                println!(
                    "{:<36}  {:<24}  {:<12}  {:<10}  DIFFICULTY",
                    "ID", "NAME", "CUISINE", "TIME"
                );
                println!("{}", "-".repeat(96));
                for recipe in &filtered {
                    let name = truncate_name(&recipe.name, 24);
                    println!(
                        "{:<36}  {:<24}  {:<12}  {:<10}  {} {}",
                        recipe.id,
                        name,
                        recipe.cuisine,
                        timefmt::format_duration(recipe.total_time()),
                        recipe.difficulty.label(),
                        recipe.difficulty.emoji()
                    );
                }
                println!("\nTotal: {} recipe(s)", filtered.len());
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ShowCommand {
    /// Recipe ID (UUID) or name
    identifier: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ShowCommand {
    pub async fn run(&self, repo: &RecipeRepository) -> Result<(), Box<dyn std::error::Error>> {
        let recipe = find_recipe(repo, &self.identifier).await?;
        match &self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            }
            OutputFormat::Text => {
                println!("{}", recipe);
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct EditCommand {
    /// Recipe ID (UUID) or name
    identifier: String,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New cuisine
    #[arg(long)]
    cuisine: Option<String>,

    /// New difficulty
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Prep time in minutes
    #[arg(long)]
    prep_time: Option<i32>,

    /// Cook time in minutes
    #[arg(long)]
    cook_time: Option<i32>,

    /// Number of servings
    #[arg(long)]
    servings: Option<i32>,

    /// Replace the ingredient list (can be repeated)
    #[arg(long = "ingredient", value_name = "INGREDIENT")]
    ingredients: Vec<String>,

    /// Replace the instruction list (can be repeated)
    #[arg(long = "instruction", value_name = "STEP")]
    instructions: Vec<String>,

    /// Replace the photo
    #[arg(long)]
    image: Option<PathBuf>,

    /// Remove the photo
    #[arg(long, conflicts_with = "image")]
    remove_image: bool,

    /// Star rating, 1 to 5
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    rating: Option<i32>,

    /// Clear the rating
    #[arg(long, conflicts_with = "rating")]
    clear_rating: bool,
}

impl EditCommand {
    pub async fn run(&self, repo: &RecipeRepository) -> Result<(), Box<dyn std::error::Error>> {
        let has_updates = self.name.is_some()
            || self.cuisine.is_some()
            || self.difficulty.is_some()
            || self.prep_time.is_some()
            || self.cook_time.is_some()
            || self.servings.is_some()
            || !self.ingredients.is_empty()
            || !self.instructions.is_empty()
            || self.image.is_some()
            || self.remove_image
            || self.rating.is_some()
            || self.clear_rating;

        if !has_updates {
            return Err("Nothing to update. Provide at least one option.".into());
        }

        let mut recipe = find_recipe(repo, &self.identifier).await?;
        let mut draft = RecipeDraft::from_recipe(&recipe);

        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(cuisine) = &self.cuisine {
            draft.cuisine = cuisine.clone();
        }
        if let Some(difficulty) = self.difficulty {
            draft.difficulty = difficulty;
        }
        if let Some(prep_time) = self.prep_time {
            draft.prep_time = prep_time;
        }
        if let Some(cook_time) = self.cook_time {
            draft.cook_time = cook_time;
        }
        if let Some(servings) = self.servings {
            draft.servings = servings;
        }
        if !self.ingredients.is_empty() {
            draft.ingredients = self.ingredients.clone();
        }
        if !self.instructions.is_empty() {
            draft.instructions = self.instructions.clone();
        }
        if let Some(image_data) = load_image(&self.image).await? {
            draft.image_data = Some(image_data);
        }
        if self.remove_image {
            draft.image_data = None;
        }
        if let Some(rating) = self.rating {
            draft.rating = Some(rating);
        }
        if self.clear_rating {
            draft.rating = None;
        }

        if !draft.is_valid() {
            return Err(NOT_SAVEABLE.into());
        }

        recipe.apply_draft(&draft);
        repo.update(&recipe).await?;

        println!("Updated recipe:");
        println!("{}", recipe);
        Ok(())
    }
}

#[derive(Args)]
pub struct DeleteCommand {
    /// Recipe ID (UUID) or name
    identifier: String,

    /// Skip confirmation prompt
    #[arg(long, short)]
    force: bool,
}

impl DeleteCommand {
    pub async fn run(&self, repo: &RecipeRepository) -> Result<(), Box<dyn std::error::Error>> {
        let recipe = find_recipe(repo, &self.identifier).await?;

        if !self.force {
            print!("Delete recipe '{}'? [y/N] ", recipe.name);
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        repo.delete(recipe.id).await?;
        println!("Deleted recipe: {}", recipe.name);
        Ok(())
    }
}

/// Shortens a name to at most `max` characters for the list table,
/// counting characters rather than bytes so multibyte names can't split.
fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let head: String = name.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Resolves an identifier as a UUID first, then as a case-insensitive name.
async fn find_recipe(
    repo: &RecipeRepository,
    identifier: &str,
) -> Result<Recipe, Box<dyn std::error::Error>> {
    let recipe = if let Ok(uuid) = Uuid::parse_str(identifier) {
        repo.get_by_id(uuid).await?
    } else {
        repo.get_by_name(identifier).await?
    };

    recipe.ok_or_else(|| format!("Recipe not found: {}", identifier).into())
}

async fn load_image(
    path: &Option<PathBuf>,
) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| format!("failed to read image '{}': {}", path.display(), e))?;
            tracing::debug!("loaded {} image bytes from {}", bytes.len(), path.display());
            Ok(Some(bytes))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name_short_names_untouched() {
        assert_eq!(truncate_name("Toast", 24), "Toast");
        assert_eq!(truncate_name("Exactly twenty-four chs.", 24), "Exactly twenty-four chs.");
    }

    #[test]
    fn test_truncate_name_long_names_get_ellipsis() {
        let name = "A very long recipe name that keeps going";
        let shown = truncate_name(name, 24);
        assert_eq!(shown, "A very long recipe na...");
        assert_eq!(shown.chars().count(), 24);
    }

    #[test]
    fn test_truncate_name_multibyte_safe() {
        // Multibyte characters near the cut point must not split.
        let name = "aaaaaaaaaaaaaaaaaaaaééééé";
        let shown = truncate_name(name, 24);
        assert_eq!(shown, "aaaaaaaaaaaaaaaaaaaaé...");
    }
}
