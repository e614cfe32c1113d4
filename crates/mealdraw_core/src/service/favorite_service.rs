//! Favorite use-case service.
//!
//! # Invariants
//! - A toggle issues one insert or delete, then re-reads the link so the
//!   returned state reflects storage rather than the intended flip.
//! - The toggle is not transactional; a concurrent writer may win.

use crate::model::catalog::{CatalogId, Recipe};
use crate::model::profile::UserId;
use crate::repo::favorite_repo::FavoriteRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum FavoriteServiceError {
    RecipeNotFound(CatalogId),
    Repo(RepoError),
}

impl Display for FavoriteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RecipeNotFound(id) => write!(f, "recipe not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FavoriteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::RecipeNotFound(_) => None,
        }
    }
}

impl From<RepoError> for FavoriteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                table: "recipes",
                id,
            } => match id.parse() {
                Ok(recipe_id) => Self::RecipeNotFound(recipe_id),
                Err(_) => Self::Repo(RepoError::NotFound {
                    table: "recipes",
                    id,
                }),
            },
            other => Self::Repo(other),
        }
    }
}

pub struct FavoriteService<R: FavoriteRepository> {
    repo: R,
}

impl<R: FavoriteRepository> FavoriteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn is_favorite(
        &self,
        user_id: UserId,
        recipe_id: CatalogId,
    ) -> Result<bool, FavoriteServiceError> {
        Ok(self.repo.is_favorite(user_id, recipe_id)?)
    }

    /// Flips the favorite state and returns the state read back afterwards.
    pub fn toggle_favorite(
        &self,
        user_id: UserId,
        recipe_id: CatalogId,
    ) -> Result<bool, FavoriteServiceError> {
        let was_favorite = self.repo.is_favorite(user_id, recipe_id)?;
        let write = if was_favorite {
            self.repo.delete_favorite(user_id, recipe_id)
        } else {
            self.repo.insert_favorite(user_id, recipe_id)
        };

        match write {
            Ok(changed) => info!(
                "event=favorite_toggle module=service status=ok recipe_id={} action={} changed={}",
                recipe_id,
                if was_favorite { "delete" } else { "insert" },
                changed
            ),
            Err(err) => {
                error!(
                    "event=favorite_toggle module=service status=error recipe_id={} error={}",
                    recipe_id, err
                );
                return Err(err.into());
            }
        }

        Ok(self.repo.is_favorite(user_id, recipe_id)?)
    }

    pub fn list_favorites(&self, user_id: UserId) -> Result<Vec<Recipe>, FavoriteServiceError> {
        Ok(self.repo.list_favorite_recipes(user_id)?)
    }
}
