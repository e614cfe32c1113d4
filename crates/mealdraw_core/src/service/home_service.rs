//! Home-screen use-cases: the recipe of the day and the tip carousel.
//!
//! # Invariants
//! - For a fixed date and catalog size the daily recipe never changes.
//! - The carousel wraps back to the first tip after the last one.

use crate::filter::{daily_index, next_tip_index};
use crate::model::catalog::{DailyTip, Recipe};
use crate::repo::catalog_repo::{CatalogRepository, RecipeOrder};
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::info;

/// Rotating view over the tip list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TipCarousel {
    tips: Vec<DailyTip>,
    position: usize,
}

impl TipCarousel {
    pub fn new(tips: Vec<DailyTip>) -> Self {
        Self { tips, position: 0 }
    }

    pub fn current(&self) -> Option<&DailyTip> {
        self.tips.get(self.position)
    }

    /// Moves to the next tip and returns it.
    pub fn advance(&mut self) -> Option<&DailyTip> {
        self.position = next_tip_index(self.position, self.tips.len());
        self.current()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }
}

/// Everything the home screen shows for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub date: NaiveDate,
    pub daily_recipe: Option<Recipe>,
    pub tips: TipCarousel,
}

pub struct HomeService<C: CatalogRepository> {
    catalog: C,
}

impl<C: CatalogRepository> HomeService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Picks the recipe of the day from the id-ordered catalog.
    pub fn daily_recipe(&self, date: NaiveDate) -> RepoResult<Option<Recipe>> {
        let mut recipes = self.catalog.list_recipes(RecipeOrder::IdAsc)?;
        let Some(index) = daily_index(date, recipes.len()) else {
            return Ok(None);
        };
        Ok(Some(recipes.swap_remove(index)))
    }

    pub fn tips(&self) -> RepoResult<TipCarousel> {
        Ok(TipCarousel::new(self.catalog.list_daily_tips()?))
    }

    pub fn home(&self, date: NaiveDate) -> RepoResult<HomeView> {
        let daily_recipe = self.daily_recipe(date)?;
        let tips = self.tips()?;
        info!(
            "event=home_load module=service status=ok date={} has_recipe={} tips={}",
            date,
            daily_recipe.is_some(),
            tips.len()
        );
        Ok(HomeView {
            date,
            daily_recipe,
            tips,
        })
    }
}
