use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Mutex;
use uuid::Uuid;

use super::StorageError;
use crate::models::Recipe;

/// What changed in the store, delivered to registered listeners after the
/// write has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

type ChangeListener = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

pub struct RecipeRepository {
    pool: SqlitePool,
    listeners: Mutex<Vec<ChangeListener>>,
}

// Row types for database queries
#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    cuisine: String,
    difficulty: String,
    prep_time: i32,
    cook_time: i32,
    servings: i32,
    date_added: String,
    image_data: Option<Vec<u8>>,
    rating: Option<i32>,
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Registers a callback invoked after every committed write.
    ///
    /// This replaces implicit live-query refresh: display layers subscribe
    /// here and re-run their query when notified. Listeners never fire for
    /// writes that fail before commit.
    pub fn on_change(&self, listener: impl Fn(&ChangeEvent) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    fn notify(&self, kind: ChangeKind, id: Uuid) {
        let event = ChangeEvent { kind, id };
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(&event);
            }
        }
    }

    /// Adds a new recipe. One transaction: the scalar row and both entry
    /// tables commit together or not at all.
    pub async fn insert(&self, recipe: &Recipe) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        let id = recipe.id.to_string();

        sqlx::query(
            r#"
            INSERT INTO recipes (id, name, cuisine, difficulty, prep_time, cook_time, servings, date_added, image_data, rating)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&recipe.name)
        .bind(&recipe.cuisine)
        .bind(recipe.difficulty.label().to_lowercase())
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(recipe.date_added.to_rfc3339())
        .bind(&recipe.image_data)
        .bind(recipe.rating)
        .execute(&mut *tx)
        .await?;

        insert_entries(&mut tx, "recipe_ingredients", &id, &recipe.ingredients).await?;
        insert_entries(&mut tx, "recipe_instructions", &id, &recipe.instructions).await?;

        tx.commit().await?;

        self.notify(ChangeKind::Inserted, recipe.id);
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StorageError> {
        let row: Option<RecipeRow> = sqlx::query_as("SELECT * FROM recipes WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => self.hydrate_recipe(row).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Recipe>, StorageError> {
        let row: Option<RecipeRow> =
            sqlx::query_as("SELECT * FROM recipes WHERE LOWER(name) = LOWER(?)")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => self.hydrate_recipe(row).await.map(Some),
            None => Ok(None),
        }
    }

    /// Returns the whole collection in a stable order (creation date, id as
    /// tiebreak). Search happens in memory, over this result.
    pub async fn query_all(&self) -> Result<Vec<Recipe>, StorageError> {
        let rows: Vec<RecipeRow> =
            sqlx::query_as("SELECT * FROM recipes ORDER BY date_added, id")
                .fetch_all(&self.pool)
                .await?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in rows {
            recipes.push(self.hydrate_recipe(row).await?);
        }
        Ok(recipes)
    }

    /// Persists an in-place edit. `id` and `date_added` are never written.
    pub async fn update(&self, recipe: &Recipe) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        let id = recipe.id.to_string();

        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET name = ?, cuisine = ?, difficulty = ?, prep_time = ?, cook_time = ?,
                servings = ?, image_data = ?, rating = ?
            WHERE id = ?
            "#,
        )
        .bind(&recipe.name)
        .bind(&recipe.cuisine)
        .bind(recipe.difficulty.label().to_lowercase())
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(&recipe.image_data)
        .bind(recipe.rating)
        .bind(&id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(recipe.id));
        }

        // Replace entry lists wholesale; positions are reassigned.
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_instructions WHERE recipe_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;

        insert_entries(&mut tx, "recipe_ingredients", &id, &recipe.ingredients).await?;
        insert_entries(&mut tx, "recipe_instructions", &id, &recipe.instructions).await?;

        tx.commit().await?;

        self.notify(ChangeKind::Updated, recipe.id);
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        // CASCADE removes ingredient and instruction rows
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }

        self.notify(ChangeKind::Deleted, id);
        Ok(())
    }

    async fn hydrate_recipe(&self, row: RecipeRow) -> Result<Recipe, StorageError> {
        let id = Uuid::parse_str(&row.id).map_err(|e| StorageError::Corrupt {
            id: row.id.clone(),
            reason: e.to_string(),
        })?;

        // A row we can't read back faithfully is an error, not a guess:
        // inventing a difficulty or a creation date would hand the caller a
        // recipe that never existed.
        let difficulty = row.difficulty.parse().map_err(|reason| StorageError::Corrupt {
            id: row.id.clone(),
            reason,
        })?;
        let date_added = DateTime::parse_from_rfc3339(&row.date_added)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StorageError::Corrupt {
                id: row.id.clone(),
                reason: e.to_string(),
            })?;

        let ingredients = fetch_entries(&self.pool, "recipe_ingredients", &row.id).await?;
        let instructions = fetch_entries(&self.pool, "recipe_instructions", &row.id).await?;

        Ok(Recipe {
            id,
            name: row.name,
            cuisine: row.cuisine,
            difficulty,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
            ingredients,
            instructions,
            date_added,
            image_data: row.image_data,
            rating: row.rating,
        })
    }
}

async fn insert_entries(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    table: &str,
    recipe_id: &str,
    entries: &[String],
) -> Result<(), StorageError> {
    for (position, value) in entries.iter().enumerate() {
        sqlx::query(&format!(
            "INSERT INTO {} (recipe_id, position, value) VALUES (?, ?, ?)",
            table
        ))
        .bind(recipe_id)
        .bind(position as i64)
        .bind(value)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn fetch_entries(
    pool: &SqlitePool,
    table: &str,
    recipe_id: &str,
) -> Result<Vec<String>, StorageError> {
    let rows: Vec<(String,)> = sqlx::query_as(&format!(
        "SELECT value FROM {} WHERE recipe_id = ? ORDER BY position",
        table
    ))
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(value,)| value).collect())
}
