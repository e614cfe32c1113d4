//! Favorite-link repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Insert, delete and look up `(user_id, recipe_id)` links.
//! - List a user's favorite recipes joined with recipe details.
//!
//! # Invariants
//! - At most one link exists per `(user_id, recipe_id)`.
//! - Links whose recipe no longer exists are never returned.

use crate::model::catalog::{CatalogId, Recipe};
use crate::model::profile::UserId;
use crate::repo::catalog_repo::{parse_recipe_row, RECIPE_COLUMNS};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode};

/// Repository interface for `user_favorites`.
pub trait FavoriteRepository {
    fn is_favorite(&self, user_id: UserId, recipe_id: CatalogId) -> RepoResult<bool>;
    /// Returns `false` when the link already existed.
    fn insert_favorite(&self, user_id: UserId, recipe_id: CatalogId) -> RepoResult<bool>;
    /// Returns `false` when there was no link to delete.
    fn delete_favorite(&self, user_id: UserId, recipe_id: CatalogId) -> RepoResult<bool>;
    /// Lists favorite recipes, most recently favorited first.
    fn list_favorite_recipes(&self, user_id: UserId) -> RepoResult<Vec<Recipe>>;
}

pub struct SqliteFavoriteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFavoriteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FavoriteRepository for SqliteFavoriteRepository<'_> {
    fn is_favorite(&self, user_id: UserId, recipe_id: CatalogId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM user_favorites
                WHERE user_id = ?1 AND recipe_id = ?2
            );",
            params![user_id.to_string(), recipe_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn insert_favorite(&self, user_id: UserId, recipe_id: CatalogId) -> RepoResult<bool> {
        let result = self.conn.execute(
            "INSERT OR IGNORE INTO user_favorites (user_id, recipe_id) VALUES (?1, ?2);",
            params![user_id.to_string(), recipe_id],
        );
        match result {
            Ok(changed) => Ok(changed > 0),
            // OR IGNORE does not cover foreign keys: the recipe is missing.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::NotFound {
                    table: "recipes",
                    id: recipe_id.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn delete_favorite(&self, user_id: UserId, recipe_id: CatalogId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM user_favorites WHERE user_id = ?1 AND recipe_id = ?2;",
            params![user_id.to_string(), recipe_id],
        )?;
        Ok(changed > 0)
    }

    fn list_favorite_recipes(&self, user_id: UserId) -> RepoResult<Vec<Recipe>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS}
             FROM user_favorites uf
             INNER JOIN recipes ON recipes.id = uf.recipe_id
             WHERE uf.user_id = ?1
             ORDER BY uf.created_at DESC, uf.id DESC;"
        ))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut recipes = Vec::new();
        while let Some(row) = rows.next()? {
            recipes.push(parse_recipe_row(row)?);
        }
        Ok(recipes)
    }
}
