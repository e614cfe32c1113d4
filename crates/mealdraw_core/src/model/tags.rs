//! Tag field model and normalization.
//!
//! # Responsibility
//! - Represent tag-like columns that arrive either as a native list or as a
//!   single legacy string (`{a,b,c}`).
//! - Produce the canonical lowercase tag list used by every filter.
//!
//! # Invariants
//! - Normalized tags are trimmed, lowercase and never empty.
//! - Adjacent duplicates are collapsed; source order is otherwise kept.
//! - Normalization is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LEGACY_BRACES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[{}]").expect("valid brace regex"));

// One legacy element: a double-quoted run (may hold commas) or a bare run.
static LEGACY_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s*"([^"]*)"\s*|([^,]+)"#).expect("valid legacy element regex")
});

/// Raw tag column value as stored or imported.
///
/// Serialized untagged, so JSON input may use either `["a","b"]` or
/// `"{a,b}"` for the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    /// Native list of tag strings.
    List(Vec<String>),
    /// Legacy brace-delimited, comma-separated string.
    Text(String),
}

impl Default for TagField {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl TagField {
    /// Builds a list field from string slices.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Decodes a stored column value.
    ///
    /// Text that parses as a JSON string array becomes `List`; anything else
    /// is kept verbatim as legacy `Text`.
    pub fn from_stored(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.starts_with('[') {
            if let Ok(values) = serde_json::from_str::<Vec<String>>(trimmed) {
                return Self::List(values);
            }
        }
        Self::Text(text.to_string())
    }

    /// Encodes this field for storage without normalizing it.
    pub fn to_stored(&self) -> String {
        match self {
            Self::List(values) => {
                serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
            }
            Self::Text(value) => value.clone(),
        }
    }

    /// Returns the canonical lowercase tag list.
    pub fn normalized(&self) -> Vec<String> {
        normalize_tags(self)
    }

    /// Splits the field like [`TagField::normalized`] but keeps original case.
    pub fn display_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = raw_parts(self)
            .into_iter()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();
        tags.dedup();
        tags
    }

    /// Returns whether the field carries no usable tag.
    pub fn is_empty(&self) -> bool {
        self.normalized().is_empty()
    }
}

/// Normalizes one tag value.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes a tag field into a lowercase, trimmed, non-empty list.
///
/// Adjacent duplicates (after lowercasing) are collapsed.
pub fn normalize_tags(field: &TagField) -> Vec<String> {
    let mut tags: Vec<String> = raw_parts(field)
        .iter()
        .filter_map(|part| normalize_tag(part))
        .collect();
    tags.dedup();
    tags
}

/// Returns up to `limit` normalized tags with an upper-cased first character.
pub fn card_labels(field: &TagField, limit: usize) -> Vec<String> {
    normalize_tags(field)
        .into_iter()
        .take(limit)
        .map(|tag| capitalize_first(&tag))
        .collect()
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn raw_parts(field: &TagField) -> Vec<String> {
    match field {
        TagField::List(values) => values.clone(),
        TagField::Text(text) => {
            if text.trim().is_empty() {
                return Vec::new();
            }
            let unbraced = LEGACY_BRACES_RE.replace_all(text, "");
            LEGACY_PART_RE
                .captures_iter(&unbraced)
                .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
                .map(|part| part.as_str().trim().to_string())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{card_labels, normalize_tag, normalize_tags, TagField};

    #[test]
    fn legacy_string_is_split_and_lowercased() {
        let field = TagField::Text("{Vegan, High-Protein ,,Breakfast}".to_string());
        assert_eq!(
            normalize_tags(&field),
            vec!["vegan", "high-protein", "breakfast"]
        );
    }

    #[test]
    fn list_values_are_trimmed_and_blank_entries_dropped() {
        let field = TagField::list([" Salad ", "", "   ", "LUNCH"]);
        assert_eq!(normalize_tags(&field), vec!["salad", "lunch"]);
    }

    #[test]
    fn adjacent_duplicates_collapse_after_lowercasing() {
        let field = TagField::list(["Keto", "keto", "lunch", "keto"]);
        assert_eq!(normalize_tags(&field), vec!["keto", "lunch", "keto"]);
    }

    #[test]
    fn quoted_legacy_elements_lose_their_quotes() {
        let field = TagField::Text(r#"{"low carb",snack}"#.to_string());
        assert_eq!(normalize_tags(&field), vec!["low carb", "snack"]);
    }

    #[test]
    fn quoted_legacy_element_keeps_its_comma() {
        let field = TagField::Text(r#"{"low, carb",snack}"#.to_string());
        assert_eq!(normalize_tags(&field), vec!["low, carb", "snack"]);
        assert_eq!(field.display_tags(), vec!["low, carb", "snack"]);

        let spaced = TagField::Text(r#"{Dinner, "Low Fat" ,"a,b,c"}"#.to_string());
        assert_eq!(normalize_tags(&spaced), vec!["dinner", "low fat", "a,b,c"]);
    }

    #[test]
    fn normalization_is_idempotent_for_list_and_text() {
        let fields = [
            TagField::list([" Keto", "KETO", "", "Low Carb ", "a,b"]),
            TagField::Text(r#"{Vegan, "High, Protein",,vegan,Breakfast}"#.to_string()),
        ];
        for field in fields {
            let once = normalize_tags(&field);
            let twice = normalize_tags(&TagField::List(once.clone()));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn blank_text_yields_no_tags() {
        assert!(TagField::Text("  ".to_string()).is_empty());
        assert!(TagField::Text("{}".to_string()).is_empty());
    }

    #[test]
    fn from_stored_recognises_json_arrays_only() {
        assert_eq!(
            TagField::from_stored(r#"["a","b"]"#),
            TagField::list(["a", "b"])
        );
        assert_eq!(
            TagField::from_stored("{a,b}"),
            TagField::Text("{a,b}".to_string())
        );
        assert_eq!(
            TagField::from_stored("[not json"),
            TagField::Text("[not json".to_string())
        );
    }

    #[test]
    fn display_tags_keep_case() {
        let field = TagField::Text("{Salad,Brunch}".to_string());
        assert_eq!(field.display_tags(), vec!["Salad", "Brunch"]);
    }

    #[test]
    fn card_labels_capitalize_and_limit() {
        let field = TagField::list(["salad", "lunch", "vegan"]);
        assert_eq!(card_labels(&field, 2), vec!["Salad", "Lunch"]);
    }

    #[test]
    fn normalize_tag_rejects_blank() {
        assert_eq!(normalize_tag("  "), None);
        assert_eq!(normalize_tag(" 午餐 ").as_deref(), Some("午餐"));
    }
}
