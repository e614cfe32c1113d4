//! Filter groups and their AND composition.
//!
//! # Responsibility
//! - Model single-select, inclusion and exclusion groups over one tag source.
//! - Decide item eligibility as the logical AND of all active groups.
//!
//! # Invariants
//! - Selected values are stored normalized (trimmed, lowercase).
//! - A single-select group never holds more than one value.
//! - A group whose selection is empty, or consists only of wildcard values,
//!   is inactive and passes every item.
//! - Toggling a multi-select value twice restores the previous selection.

use crate::model::tags::normalize_tag;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which tag-like field of a record a group inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagSource {
    /// Generic `tags` column (recipes).
    Tags,
    /// `location` column (restaurants).
    Location,
    /// `type` column (restaurants).
    Kind,
    /// `intensity` column (sports).
    Intensity,
}

/// Records that expose normalized tags per source.
pub trait Taggable {
    /// Returns the normalized tags for `source`, or an empty list when the
    /// record has no such field.
    fn tags_for(&self, source: TagSource) -> Vec<String>;
}

/// How a group matches its selection against an item's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one value; the item must carry it.
    Single,
    /// Any number of values; the item must carry at least one.
    Include,
    /// Any number of values; the item must carry none.
    Exclude,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    UnknownGroup(String),
    /// More than one value passed to a single-select group.
    TooManyValues { group: &'static str, count: usize },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownGroup(name) => write!(f, "unknown filter group `{name}`"),
            Self::TooManyValues { group, count } => write!(
                f,
                "filter group `{group}` is single-select but got {count} values"
            ),
        }
    }
}

impl Error for FilterError {}

/// One facet of a filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    name: &'static str,
    source: TagSource,
    mode: SelectionMode,
    selected: BTreeSet<String>,
    wildcards: BTreeSet<String>,
}

impl FilterGroup {
    pub fn new(name: &'static str, source: TagSource, mode: SelectionMode) -> Self {
        Self {
            name,
            source,
            mode,
            selected: BTreeSet::new(),
            wildcards: BTreeSet::new(),
        }
    }

    pub fn single(name: &'static str, source: TagSource) -> Self {
        Self::new(name, source, SelectionMode::Single)
    }

    pub fn include(name: &'static str, source: TagSource) -> Self {
        Self::new(name, source, SelectionMode::Include)
    }

    pub fn exclude(name: &'static str, source: TagSource) -> Self {
        Self::new(name, source, SelectionMode::Exclude)
    }

    /// Declares a value that, when it is the whole selection, disables the group.
    pub fn with_wildcard(mut self, value: &str) -> Self {
        if let Some(normalized) = normalize_tag(value) {
            self.wildcards.insert(normalized);
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> TagSource {
        self.source
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Current normalized selection in sorted order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn is_selected(&self, value: &str) -> bool {
        normalize_tag(value).is_some_and(|value| self.selected.contains(&value))
    }

    /// Returns whether this group constrains eligibility at all.
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty() && !self.selected.is_subset(&self.wildcards)
    }

    /// Flips `value` in the selection.
    ///
    /// Single-select: picking the current value clears the group, picking a
    /// different value replaces it. Multi-select: adds or removes `value`.
    /// Blank input is ignored.
    pub fn toggle(&mut self, value: &str) {
        let Some(value) = normalize_tag(value) else {
            return;
        };
        match self.mode {
            SelectionMode::Single => {
                let was_selected = self.selected.contains(&value);
                self.selected.clear();
                if !was_selected {
                    self.selected.insert(value);
                }
            }
            SelectionMode::Include | SelectionMode::Exclude => {
                if !self.selected.remove(&value) {
                    self.selected.insert(value);
                }
            }
        }
    }

    /// Replaces the whole selection.
    pub fn set_values<I, S>(&mut self, values: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let next: BTreeSet<String> = values
            .into_iter()
            .filter_map(|value| normalize_tag(value.as_ref()))
            .collect();
        if self.mode == SelectionMode::Single && next.len() > 1 {
            return Err(FilterError::TooManyValues {
                group: self.name,
                count: next.len(),
            });
        }
        self.selected = next;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Checks one item's tags for this group's source.
    pub fn passes_tags(&self, item_tags: &[String]) -> bool {
        if !self.is_active() {
            return true;
        }
        let hit = item_tags.iter().any(|tag| self.selected.contains(tag));
        match self.mode {
            SelectionMode::Single | SelectionMode::Include => hit,
            SelectionMode::Exclude => !hit,
        }
    }

    pub fn passes<T: Taggable + ?Sized>(&self, item: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        self.passes_tags(&item.tags_for(self.source))
    }
}

/// Ordered collection of filter groups combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    groups: Vec<FilterGroup>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&FilterGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Result<&mut FilterGroup, FilterError> {
        self.groups
            .iter_mut()
            .find(|group| group.name == name)
            .ok_or_else(|| FilterError::UnknownGroup(name.to_string()))
    }

    pub fn toggle(&mut self, group: &str, value: &str) -> Result<(), FilterError> {
        self.group_mut(group)?.toggle(value);
        Ok(())
    }

    pub fn set_values<I, S>(&mut self, group: &str, values: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.group_mut(group)?.set_values(values)
    }

    /// Clears every group's selection.
    pub fn reset(&mut self) {
        for group in &mut self.groups {
            group.clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.groups.iter().any(FilterGroup::is_active)
    }

    pub fn passes<T: Taggable + ?Sized>(&self, item: &T) -> bool {
        self.groups.iter().all(|group| group.passes(item))
    }

    /// Returns the items passing every active group, in input order.
    pub fn eligible<'a, T: Taggable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.passes(*item)).collect()
    }

    pub fn count<T: Taggable>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.passes(*item)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterError, FilterGroup, FilterSet, SelectionMode, TagSource};

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn single_select_toggle_replaces_then_clears() {
        let mut group = FilterGroup::single("meal", TagSource::Tags);
        group.toggle("Lunch");
        group.toggle("Dinner");
        assert_eq!(group.selected().collect::<Vec<_>>(), vec!["dinner"]);
        group.toggle("DINNER");
        assert!(!group.is_active());
    }

    #[test]
    fn multi_select_toggle_twice_is_identity() {
        let mut group = FilterGroup::include("goal", TagSource::Tags);
        group.toggle("b");
        group.toggle("a");
        let before = group.clone();
        group.toggle("c");
        group.toggle("c");
        assert_eq!(group, before);
        group.toggle("a");
        group.toggle("a");
        assert_eq!(group, before);
    }

    #[test]
    fn wildcard_only_selection_is_inactive() {
        let mut group = FilterGroup::single("diet", TagSource::Tags).with_wildcard("General");
        group.toggle("general");
        assert!(!group.is_active());
        assert!(group.passes_tags(&tags(&["keto"])));
        group.toggle("vegan");
        assert!(group.is_active());
        assert!(!group.passes_tags(&tags(&["keto"])));
    }

    #[test]
    fn exclude_rejects_any_overlap() {
        let mut group = FilterGroup::exclude("allergen", TagSource::Tags);
        group.set_values(["peanut", "egg"]).unwrap();
        assert!(!group.passes_tags(&tags(&["salad", "egg"])));
        assert!(group.passes_tags(&tags(&["salad"])));
        assert_eq!(group.mode(), SelectionMode::Exclude);
    }

    #[test]
    fn single_select_rejects_multiple_values() {
        let mut group = FilterGroup::single("meal", TagSource::Tags);
        let err = group.set_values(["a", "b"]).unwrap_err();
        assert!(matches!(err, FilterError::TooManyValues { count: 2, .. }));
    }

    #[test]
    fn unknown_group_is_reported() {
        let mut set = FilterSet::new().with(FilterGroup::single("meal", TagSource::Tags));
        let err = set.toggle("mood", "happy").unwrap_err();
        assert_eq!(err, FilterError::UnknownGroup("mood".to_string()));
    }
}
