//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod draw_service;
pub mod favorite_service;
pub mod home_service;
pub mod import_service;
pub mod profile_service;
pub mod recipe_service;
