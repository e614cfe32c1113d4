//! Recipe browse and detail use-cases.

use crate::filter::search_recipes;
use crate::model::catalog::{CatalogId, Recipe};
use crate::repo::catalog_repo::{CatalogRepository, RecipeOrder};
use crate::repo::{RepoError, RepoResult};

/// Browse-list result envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeListResult {
    /// Recipes sorted by id, newest first.
    pub items: Vec<Recipe>,
    /// Normalized search term that produced `items`, if any.
    pub search_term: Option<String>,
}

pub struct RecipeService<C: CatalogRepository> {
    catalog: C,
}

impl<C: CatalogRepository> RecipeService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Lists every recipe, optionally narrowed by a title/tag keyword.
    pub fn list_recipes(&self, search: Option<&str>) -> RepoResult<RecipeListResult> {
        let recipes = self.catalog.list_recipes(RecipeOrder::IdDesc)?;
        let term = search
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        let Some(term) = term else {
            return Ok(RecipeListResult {
                items: recipes,
                search_term: None,
            });
        };

        let items = search_recipes(&recipes, &term).into_iter().cloned().collect();
        Ok(RecipeListResult {
            items,
            search_term: Some(term),
        })
    }

    /// Loads one recipe, failing with `NotFound` for unknown ids.
    pub fn get_recipe(&self, id: CatalogId) -> RepoResult<Recipe> {
        self.catalog
            .get_recipe(id)?
            .ok_or_else(|| RepoError::NotFound {
                table: "recipes",
                id: id.to_string(),
            })
    }
}
