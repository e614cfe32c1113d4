//! Client-side filtering and random draw.
//!
//! # Responsibility
//! - Compose facet groups into an AND filter over catalog records.
//! - Draw one eligible record uniformly at random.
//! - Keep one engine for recipes, restaurants and exercises.
//!
//! # Invariants
//! - Filtering only reads records; it never mutates or reorders input.
//! - "No match" is an outcome, not an error.

pub mod draw;
pub mod facets;
pub mod group;
pub mod search;

pub use draw::{daily_index, draw, next_tip_index, pick_uniform, DrawOutcome};
pub use group::{FilterError, FilterGroup, FilterSet, SelectionMode, TagSource, Taggable};
pub use search::search_recipes;
