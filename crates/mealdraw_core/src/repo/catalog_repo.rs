//! Catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Read whole catalog tables for client-side filtering.
//! - Upsert catalog rows during import.
//!
//! # Invariants
//! - Tag-like columns are written exactly as provided (JSON array or legacy
//!   string) and decoded with `TagField::from_stored` on read.
//! - Upserts update rows in place, so favorites referencing a recipe survive
//!   a re-import.

use crate::model::catalog::{split_steps, CatalogId, DailyTip, Recipe, Restaurant, Sport};
use crate::model::tags::TagField;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const RECIPE_COLUMNS: &str = "recipes.id,
    recipes.title,
    recipes.description,
    recipes.tags,
    recipes.image_url,
    recipes.duration_min,
    recipes.calories,
    recipes.ingredients,
    recipes.instructions";

/// Ordering for full recipe listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecipeOrder {
    #[default]
    IdAsc,
    /// Newest rows first, as the browse list shows them.
    IdDesc,
}

/// Repository interface for catalog tables.
pub trait CatalogRepository {
    fn list_recipes(&self, order: RecipeOrder) -> RepoResult<Vec<Recipe>>;
    fn get_recipe(&self, id: CatalogId) -> RepoResult<Option<Recipe>>;
    fn list_restaurants(&self) -> RepoResult<Vec<Restaurant>>;
    fn list_sports(&self) -> RepoResult<Vec<Sport>>;
    fn list_daily_tips(&self) -> RepoResult<Vec<DailyTip>>;
    fn upsert_recipe(&self, recipe: &Recipe) -> RepoResult<()>;
    fn upsert_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()>;
    fn upsert_sport(&self, sport: &Sport) -> RepoResult<()>;
    fn upsert_daily_tip(&self, tip: &DailyTip) -> RepoResult<()>;
}

/// SQLite-backed catalog repository.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn list_recipes(&self, order: RecipeOrder) -> RepoResult<Vec<Recipe>> {
        let direction = match order {
            RecipeOrder::IdAsc => "ASC",
            RecipeOrder::IdDesc => "DESC",
        };
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY recipes.id {direction};"
        ))?;
        let mut rows = stmt.query([])?;
        let mut recipes = Vec::new();
        while let Some(row) = rows.next()? {
            recipes.push(parse_recipe_row(row)?);
        }
        Ok(recipes)
    }

    fn get_recipe(&self, id: CatalogId) -> RepoResult<Option<Recipe>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE recipes.id = ?1;"
        ))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_recipe_row(row)?));
        }
        Ok(None)
    }

    fn list_restaurants(&self) -> RepoResult<Vec<Restaurant>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, location, type, rating, address, map_url, image_url
             FROM restaurants
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut restaurants = Vec::new();
        while let Some(row) = rows.next()? {
            let location: String = row.get("location")?;
            let kind: String = row.get("type")?;
            restaurants.push(Restaurant {
                id: row.get("id")?,
                name: row.get("name")?,
                location: TagField::from_stored(&location),
                kind: TagField::from_stored(&kind),
                rating: row.get("rating")?,
                address: row.get("address")?,
                map_url: row.get("map_url")?,
                image_url: row.get("image_url")?,
            });
        }
        Ok(restaurants)
    }

    fn list_sports(&self) -> RepoResult<Vec<Sport>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, duration, intensity, instruction, video_url, image_url
             FROM sports
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut sports = Vec::new();
        while let Some(row) = rows.next()? {
            let intensity: String = row.get("intensity")?;
            sports.push(Sport {
                id: row.get("id")?,
                name: row.get("name")?,
                description: row.get("description")?,
                duration: row.get("duration")?,
                intensity: TagField::from_stored(&intensity),
                instruction: row.get("instruction")?,
                video_url: row.get("video_url")?,
                image_url: row.get("image_url")?,
            });
        }
        Ok(sports)
    }

    fn list_daily_tips(&self) -> RepoResult<Vec<DailyTip>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, content, category FROM daily_tips ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tips = Vec::new();
        while let Some(row) = rows.next()? {
            tips.push(DailyTip {
                id: row.get("id")?,
                content: row.get("content")?,
                category: row.get("category")?,
            });
        }
        Ok(tips)
    }

    fn upsert_recipe(&self, recipe: &Recipe) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO recipes (
                id, title, description, tags, image_url,
                duration_min, calories, ingredients, instructions
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                tags = excluded.tags,
                image_url = excluded.image_url,
                duration_min = excluded.duration_min,
                calories = excluded.calories,
                ingredients = excluded.ingredients,
                instructions = excluded.instructions;",
            params![
                recipe.id,
                recipe.title.as_str(),
                recipe.description.as_str(),
                recipe.tags.to_stored(),
                recipe.image_url.as_deref(),
                recipe.duration_min,
                recipe.calories,
                encode_lines(&recipe.ingredients)?,
                encode_lines(&recipe.instructions)?,
            ],
        )?;
        Ok(())
    }

    fn upsert_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO restaurants (
                id, name, location, type, rating, address, map_url, image_url
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                location = excluded.location,
                type = excluded.type,
                rating = excluded.rating,
                address = excluded.address,
                map_url = excluded.map_url,
                image_url = excluded.image_url;",
            params![
                restaurant.id,
                restaurant.name.as_str(),
                restaurant.location.to_stored(),
                restaurant.kind.to_stored(),
                restaurant.rating,
                restaurant.address.as_deref(),
                restaurant.map_url.as_deref(),
                restaurant.image_url.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn upsert_sport(&self, sport: &Sport) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO sports (
                id, name, description, duration, intensity, instruction, video_url, image_url
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                duration = excluded.duration,
                intensity = excluded.intensity,
                instruction = excluded.instruction,
                video_url = excluded.video_url,
                image_url = excluded.image_url;",
            params![
                sport.id,
                sport.name.as_str(),
                sport.description.as_str(),
                sport.duration.as_deref(),
                sport.intensity.to_stored(),
                sport.instruction.as_deref(),
                sport.video_url.as_deref(),
                sport.image_url.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn upsert_daily_tip(&self, tip: &DailyTip) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO daily_tips (id, content, category) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                category = excluded.category;",
            params![tip.id, tip.content.as_str(), tip.category.as_deref()],
        )?;
        Ok(())
    }
}

/// Decodes one row selected with [`RECIPE_COLUMNS`].
pub(crate) fn parse_recipe_row(row: &Row<'_>) -> RepoResult<Recipe> {
    let id: CatalogId = row.get(0)?;
    let tags: String = row.get(3)?;
    let ingredients: String = row.get(7)?;
    let instructions: String = row.get(8)?;

    Ok(Recipe {
        id,
        title: row.get(1)?,
        description: row.get(2)?,
        tags: TagField::from_stored(&tags),
        image_url: row.get(4)?,
        duration_min: row.get(5)?,
        calories: row.get(6)?,
        ingredients: decode_lines(&ingredients, "recipes.ingredients", id)?,
        instructions: decode_steps(&instructions, id)?,
    })
}

fn encode_lines(lines: &[String]) -> RepoResult<String> {
    serde_json::to_string(lines)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode text list: {err}")))
}

/// Instructions written by hand may hold a numbered string instead of a JSON list.
fn decode_steps(text: &str, id: CatalogId) -> RepoResult<Vec<String>> {
    if text.trim_start().starts_with('[') {
        return decode_lines(text, "recipes.instructions", id);
    }
    Ok(split_steps(text))
}

fn decode_lines(text: &str, column: &str, id: CatalogId) -> RepoResult<Vec<String>> {
    serde_json::from_str(text).map_err(|err| {
        RepoError::InvalidData(format!("invalid JSON list in {column} for id {id}: {err}"))
    })
}
