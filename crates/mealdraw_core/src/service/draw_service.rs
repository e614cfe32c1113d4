//! Draw use-case service for recipes, restaurants and exercises.
//!
//! # Responsibility
//! - Fetch a whole catalog table, apply the caller's filter panel and draw.
//! - Derive recipe filter defaults from a saved user profile.
//! - Report live "how many match" counts for a filter panel.
//!
//! # Invariants
//! - Each call re-reads the table; nothing is cached between draws.
//! - A drawn record always passes every active filter group.

use crate::filter::facets::{recipe_filters, GROUP_ALLERGEN, GROUP_DIET, GROUP_GOAL};
use crate::filter::{draw, search_recipes, DrawOutcome, FilterError, FilterSet};
use crate::model::catalog::{Recipe, Restaurant, Sport};
use crate::model::profile::UserProfile;
use crate::repo::catalog_repo::{CatalogRepository, RecipeOrder};
use crate::repo::RepoResult;
use log::{debug, info};
use rand::Rng;

/// Match counts for a filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPreview {
    /// Rows in the table before filtering.
    pub catalog_size: usize,
    /// Rows passing every active group.
    pub eligible: usize,
}

/// Recipe-draw request: filter panel plus optional keyword narrowing.
#[derive(Debug, Clone, Default)]
pub struct RecipeDrawRequest {
    pub filters: FilterSet,
    /// Restricts the pool to recipes whose title or tags contain the term.
    pub search: Option<String>,
}

impl RecipeDrawRequest {
    pub fn new(filters: FilterSet) -> Self {
        Self {
            filters,
            search: None,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// Builds the recipe panel pre-filled from a saved profile.
///
/// Goals and allergens are copied as-is; the diet habit becomes the diet
/// selection (the general-diet wildcard leaves that group inactive).
pub fn recipe_filters_for(profile: &UserProfile) -> Result<FilterSet, FilterError> {
    let mut filters = recipe_filters();
    filters.set_values(GROUP_GOAL, &profile.health_goals)?;
    filters.set_values(GROUP_ALLERGEN, &profile.allergens)?;
    filters.set_values(GROUP_DIET, [profile.dietary_habit.as_str()])?;
    Ok(filters)
}

/// Draw service facade over a catalog repository.
pub struct DrawService<C: CatalogRepository> {
    catalog: C,
}

impl<C: CatalogRepository> DrawService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Draws one recipe under `request`.
    pub fn draw_recipe<R>(
        &self,
        request: &RecipeDrawRequest,
        rng: &mut R,
    ) -> RepoResult<DrawOutcome<Recipe>>
    where
        R: Rng + ?Sized,
    {
        let pool = self.recipe_pool(request.search.as_deref())?;
        let outcome = draw(&pool, &request.filters, rng);
        log_outcome("recipe", &outcome);
        Ok(outcome)
    }

    /// Counts recipes matching `request` without drawing.
    pub fn preview_recipes(&self, request: &RecipeDrawRequest) -> RepoResult<FilterPreview> {
        let pool = self.recipe_pool(request.search.as_deref())?;
        Ok(FilterPreview {
            catalog_size: pool.len(),
            eligible: request.filters.count(&pool),
        })
    }

    pub fn draw_restaurant<R>(
        &self,
        filters: &FilterSet,
        rng: &mut R,
    ) -> RepoResult<DrawOutcome<Restaurant>>
    where
        R: Rng + ?Sized,
    {
        let restaurants = self.catalog.list_restaurants()?;
        let outcome = draw(&restaurants, filters, rng);
        log_outcome("restaurant", &outcome);
        Ok(outcome)
    }

    pub fn preview_restaurants(&self, filters: &FilterSet) -> RepoResult<FilterPreview> {
        let restaurants = self.catalog.list_restaurants()?;
        Ok(FilterPreview {
            catalog_size: restaurants.len(),
            eligible: filters.count(&restaurants),
        })
    }

    pub fn draw_sport<R>(&self, filters: &FilterSet, rng: &mut R) -> RepoResult<DrawOutcome<Sport>>
    where
        R: Rng + ?Sized,
    {
        let sports = self.catalog.list_sports()?;
        let outcome = draw(&sports, filters, rng);
        log_outcome("sport", &outcome);
        Ok(outcome)
    }

    pub fn preview_sports(&self, filters: &FilterSet) -> RepoResult<FilterPreview> {
        let sports = self.catalog.list_sports()?;
        Ok(FilterPreview {
            catalog_size: sports.len(),
            eligible: filters.count(&sports),
        })
    }

    fn recipe_pool(&self, search: Option<&str>) -> RepoResult<Vec<Recipe>> {
        let recipes = self.catalog.list_recipes(RecipeOrder::IdAsc)?;
        match search {
            Some(term) if !term.trim().is_empty() => {
                let matched: Vec<Recipe> = search_recipes(&recipes, term)
                    .into_iter()
                    .cloned()
                    .collect();
                debug!(
                    "event=recipe_search module=service status=ok total={} matched={}",
                    recipes.len(),
                    matched.len()
                );
                Ok(matched)
            }
            _ => Ok(recipes),
        }
    }
}

fn log_outcome<T>(domain: &str, outcome: &DrawOutcome<T>) {
    match outcome {
        DrawOutcome::Picked { eligible, .. } => {
            info!("event=draw module=service status=ok domain={domain} eligible={eligible}");
        }
        DrawOutcome::NoMatch { catalog_size } => {
            info!(
                "event=draw module=service status=no_match domain={domain} catalog_size={catalog_size}"
            );
        }
    }
}
