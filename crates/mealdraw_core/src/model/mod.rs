//! Domain model for catalog rows and user preference records.
//!
//! # Responsibility
//! - Define the passive records fetched from storage.
//! - Own tag-field representation and normalization.
//!
//! # Invariants
//! - Catalog records carry no lifecycle state; they are read-only here.
//! - User-owned records use last-write-wins semantics.

pub mod catalog;
pub mod profile;
pub mod tags;
