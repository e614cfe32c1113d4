//! Catalog import from a JSON document.
//!
//! # Responsibility
//! - Parse `{ recipes, restaurants, sports, daily_tips }` documents where
//!   tag-like fields may be arrays or legacy brace strings.
//! - Upsert every record inside one immediate transaction.
//!
//! # Invariants
//! - Either the whole document is applied or nothing is.
//! - Re-importing an id overwrites the row in place; favorites survive.

use crate::model::catalog::{DailyTip, Recipe, Restaurant, Sport};
use crate::repo::catalog_repo::{CatalogRepository, SqliteCatalogRepository};
use crate::repo::RepoError;
use log::{error, info};
use rusqlite::{Connection, TransactionBehavior};
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Top-level import document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogImport {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub sports: Vec<Sport>,
    #[serde(default)]
    pub daily_tips: Vec<DailyTip>,
}

/// Row counts written by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub recipes: usize,
    pub restaurants: usize,
    pub sports: usize,
    pub daily_tips: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.recipes + self.restaurants + self.sports + self.daily_tips
    }
}

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A record is missing its display text.
    InvalidRecord { table: &'static str, id: i64 },
    DuplicateId { table: &'static str, id: i64 },
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read catalog file: {err}"),
            Self::Parse(err) => write!(f, "invalid catalog document: {err}"),
            Self::InvalidRecord { table, id } => {
                write!(f, "{table} record {id} has an empty title or name")
            }
            Self::DuplicateId { table, id } => write!(f, "duplicate {table} id {id} in document"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidRecord { .. } | Self::DuplicateId { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ImportError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

pub fn parse_catalog(text: &str) -> Result<CatalogImport, ImportError> {
    let document: CatalogImport = serde_json::from_str(text)?;
    validate(&document)?;
    Ok(document)
}

/// Reads, validates and applies a catalog file.
pub fn import_catalog_file(
    conn: &mut Connection,
    path: impl AsRef<Path>,
) -> Result<ImportSummary, ImportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|err| {
        error!(
            "event=catalog_import module=service status=error path={} error={}",
            path.display(),
            err
        );
        ImportError::from(err)
    })?;
    let document = parse_catalog(&text)?;
    import_catalog(conn, &document)
}

/// Applies `document` in a single transaction.
pub fn import_catalog(
    conn: &mut Connection,
    document: &CatalogImport,
) -> Result<ImportSummary, ImportError> {
    validate(document)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let summary = {
        let repo = SqliteCatalogRepository::new(&tx);
        match write_all(&repo, document) {
            Ok(summary) => summary,
            Err(err) => {
                error!(
                    "event=catalog_import module=service status=error error={}",
                    err
                );
                return Err(err);
            }
        }
    };
    tx.commit()?;

    info!(
        "event=catalog_import module=service status=ok recipes={} restaurants={} sports={} daily_tips={}",
        summary.recipes, summary.restaurants, summary.sports, summary.daily_tips
    );
    Ok(summary)
}

fn write_all<C: CatalogRepository>(
    repo: &C,
    document: &CatalogImport,
) -> Result<ImportSummary, ImportError> {
    for recipe in &document.recipes {
        repo.upsert_recipe(recipe)?;
    }
    for restaurant in &document.restaurants {
        repo.upsert_restaurant(restaurant)?;
    }
    for sport in &document.sports {
        repo.upsert_sport(sport)?;
    }
    for tip in &document.daily_tips {
        repo.upsert_daily_tip(tip)?;
    }
    Ok(ImportSummary {
        recipes: document.recipes.len(),
        restaurants: document.restaurants.len(),
        sports: document.sports.len(),
        daily_tips: document.daily_tips.len(),
    })
}

fn validate(document: &CatalogImport) -> Result<(), ImportError> {
    check_table(
        "recipes",
        document.recipes.iter().map(|r| (r.id, r.title.as_str())),
    )?;
    check_table(
        "restaurants",
        document.restaurants.iter().map(|r| (r.id, r.name.as_str())),
    )?;
    check_table(
        "sports",
        document.sports.iter().map(|s| (s.id, s.name.as_str())),
    )?;
    check_table(
        "daily_tips",
        document.daily_tips.iter().map(|t| (t.id, t.content.as_str())),
    )
}

fn check_table<'a>(
    table: &'static str,
    rows: impl Iterator<Item = (i64, &'a str)>,
) -> Result<(), ImportError> {
    let mut seen = HashSet::new();
    for (id, text) in rows {
        if text.trim().is_empty() {
            return Err(ImportError::InvalidRecord { table, id });
        }
        if !seen.insert(id) {
            return Err(ImportError::DuplicateId { table, id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_catalog, ImportError};
    use crate::model::tags::TagField;

    #[test]
    fn parse_accepts_array_and_legacy_string_tags() {
        let document = parse_catalog(
            r#"{
                "recipes": [
                    {"id": 1, "title": "Oats", "tags": ["Breakfast", "High Fiber"]},
                    {"id": 2, "title": "Soup", "tags": "{Dinner,\"Low Fat\"}"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(document.recipes.len(), 2);
        assert!(matches!(document.recipes[0].tags, TagField::List(_)));
        assert_eq!(
            document.recipes[1].tags.normalized(),
            vec!["dinner".to_string(), "low fat".to_string()]
        );
        assert!(document.sports.is_empty());
    }

    #[test]
    fn parse_rejects_duplicate_ids() {
        let err = parse_catalog(
            r#"{"sports": [
                {"id": 3, "name": "Walk", "intensity": ["低"]},
                {"id": 3, "name": "Run", "intensity": ["高"]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ImportError::DuplicateId {
                table: "sports",
                id: 3
            }
        ));
    }

    #[test]
    fn parse_rejects_blank_titles() {
        let err = parse_catalog(r#"{"recipes": [{"id": 9, "title": "  "}]}"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidRecord { table: "recipes", id: 9 }));
    }
}
