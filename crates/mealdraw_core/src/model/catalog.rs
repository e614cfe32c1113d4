//! Catalog records: recipes, restaurants, exercises and daily tips.
//!
//! # Responsibility
//! - Define the passive rows read from catalog tables.
//! - Expose each record's tag-like fields to the filter engine.
//!
//! # Invariants
//! - Records are returned verbatim; tag fields are normalized on read by
//!   [`Taggable::tags_for`], never rewritten in place.
//! - Recipe steps are always held as a list; a numbered string such as
//!   `"1. Boil 2. Stir"` is split into steps when it is read.

use crate::filter::{TagSource, Taggable};
use crate::model::tags::TagField;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

static STEP_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\d+\.\s*").expect("valid step marker regex"));

/// Row id shared by all catalog tables.
pub type CatalogId = i64;

/// Recipe row from the `recipes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: CatalogId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: TagField,
    /// Relative object path inside the image bucket.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub duration_min: Option<i64>,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered steps. Input may be a JSON array or one numbered string.
    #[serde(default, deserialize_with = "deserialize_steps")]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Creates a recipe with only the fields the filters care about.
    pub fn new(id: CatalogId, title: impl Into<String>, tags: TagField) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            tags,
            image_url: None,
            duration_min: None,
            calories: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

impl Taggable for Recipe {
    fn tags_for(&self, source: TagSource) -> Vec<String> {
        match source {
            TagSource::Tags => self.tags.normalized(),
            _ => Vec::new(),
        }
    }
}

/// Restaurant row from the `restaurants` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: CatalogId,
    pub name: String,
    /// District list, e.g. `["西屯區"]`.
    #[serde(default)]
    pub location: TagField,
    /// Restaurant category; stored in the `type` column.
    #[serde(rename = "type", default)]
    pub kind: TagField,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Restaurant {
    pub fn new(id: CatalogId, name: impl Into<String>, location: TagField, kind: TagField) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            kind,
            rating: None,
            address: None,
            map_url: None,
            image_url: None,
        }
    }
}

impl Taggable for Restaurant {
    fn tags_for(&self, source: TagSource) -> Vec<String> {
        match source {
            TagSource::Location => self.location.normalized(),
            TagSource::Kind => self.kind.normalized(),
            _ => Vec::new(),
        }
    }
}

/// Exercise row from the `sports` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sport {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free text such as `"10 分鐘"`.
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub intensity: TagField,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Sport {
    pub fn new(id: CatalogId, name: impl Into<String>, intensity: TagField) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            duration: None,
            intensity,
            instruction: None,
            video_url: None,
            image_url: None,
        }
    }
}

impl Taggable for Sport {
    fn tags_for(&self, source: TagSource) -> Vec<String> {
        match source {
            TagSource::Intensity => self.intensity.normalized(),
            _ => Vec::new(),
        }
    }
}

/// Row from the `daily_tips` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTip {
    pub id: CatalogId,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Splits a numbered instruction string (`"1. Boil 2. Stir"`) into steps.
///
/// Text without step markers becomes a single step; blank steps are dropped.
pub fn split_steps(text: &str) -> Vec<String> {
    STEP_MARKER_RE
        .split(text)
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepsInput {
    List(Vec<String>),
    Text(String),
}

fn deserialize_steps<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StepsInput>::deserialize(deserializer)? {
        Some(StepsInput::List(steps)) => steps,
        Some(StepsInput::Text(text)) => split_steps(&text),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::{split_steps, Recipe};

    #[test]
    fn numbered_string_is_split_into_steps() {
        assert_eq!(
            split_steps("1. Boil water 2. Add tofu  3.Serve"),
            vec!["Boil water", "Add tofu", "Serve"]
        );
    }

    #[test]
    fn unnumbered_string_is_one_step_and_blank_is_none() {
        assert_eq!(split_steps("Mix everything"), vec!["Mix everything"]);
        assert!(split_steps("  ").is_empty());
        assert!(split_steps("1. 2.").is_empty());
    }

    #[test]
    fn recipe_accepts_list_string_or_null_instructions() {
        let listed: Recipe =
            serde_json::from_str(r#"{"id":1,"title":"Soup","instructions":["Boil","Stir"]}"#)
                .unwrap();
        assert_eq!(listed.instructions, vec!["Boil", "Stir"]);

        let numbered: Recipe = serde_json::from_str(
            r#"{"id":1,"title":"Soup","instructions":"1. Boil water 2. Add tofu"}"#,
        )
        .unwrap();
        assert_eq!(numbered.instructions, vec!["Boil water", "Add tofu"]);

        let absent: Recipe = serde_json::from_str(r#"{"id":1,"title":"Soup"}"#).unwrap();
        assert!(absent.instructions.is_empty());

        let null: Recipe =
            serde_json::from_str(r#"{"id":1,"title":"Soup","instructions":null}"#).unwrap();
        assert!(null.instructions.is_empty());
    }
}
