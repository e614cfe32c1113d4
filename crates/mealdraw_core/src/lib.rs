//! Core domain logic for MealDraw.
//! Catalog storage, tag filtering and random draws for recipes, restaurants
//! and exercises, plus per-user profiles and favorites.

pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use filter::{DrawOutcome, FilterError, FilterGroup, FilterSet, SelectionMode, TagSource};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::catalog::{split_steps, CatalogId, DailyTip, Recipe, Restaurant, Sport};
pub use model::profile::{UserId, UserProfile};
pub use model::tags::{normalize_tags, TagField};
pub use repo::catalog_repo::{CatalogRepository, RecipeOrder, SqliteCatalogRepository};
pub use repo::favorite_repo::{FavoriteRepository, SqliteFavoriteRepository};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use repo::{RepoError, RepoResult};
pub use rusqlite::Connection;
pub use service::draw_service::{recipe_filters_for, DrawService, FilterPreview, RecipeDrawRequest};
pub use service::favorite_service::{FavoriteService, FavoriteServiceError};
pub use service::home_service::{HomeService, HomeView, TipCarousel};
pub use service::import_service::{
    import_catalog, import_catalog_file, parse_catalog, CatalogImport, ImportError, ImportSummary,
};
pub use service::profile_service::{ProfileService, ProfileServiceError};
pub use service::recipe_service::{RecipeListResult, RecipeService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
