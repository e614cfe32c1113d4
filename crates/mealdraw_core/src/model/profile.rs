//! User preference profile.
//!
//! # Responsibility
//! - Hold the per-user dietary preferences used as draw defaults.
//! - Provide multi-select toggle helpers for profile editing.
//!
//! # Invariants
//! - A missing stored profile is represented by [`UserProfile::new`] defaults,
//!   never by an error.
//! - `health_goals` and `allergens` contain no duplicate values.

use crate::filter::facets::GENERAL_DIET;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the acting user, issued by the external auth provider.
pub type UserId = Uuid;

/// Dietary preferences stored in `user_profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub health_goals: Vec<String>,
    /// Single-select diet habit; defaults to the general-diet wildcard.
    pub dietary_habit: String,
    pub allergens: Vec<String>,
}

impl UserProfile {
    /// Default profile for a user who never saved preferences.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            health_goals: Vec::new(),
            dietary_habit: GENERAL_DIET.to_string(),
            allergens: Vec::new(),
        }
    }

    /// Adds `goal` if absent, removes it otherwise.
    pub fn toggle_goal(&mut self, goal: &str) {
        toggle_value(&mut self.health_goals, goal);
    }

    /// Adds `allergen` if absent, removes it otherwise.
    pub fn toggle_allergen(&mut self, allergen: &str) {
        toggle_value(&mut self.allergens, allergen);
    }

    /// Replaces the diet habit. Blank input falls back to the general diet.
    pub fn set_dietary_habit(&mut self, diet: &str) {
        let trimmed = diet.trim();
        self.dietary_habit = if trimmed.is_empty() {
            GENERAL_DIET.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

fn toggle_value(values: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    if let Some(pos) = values.iter().position(|existing| existing == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::UserProfile;
    use crate::filter::facets::GENERAL_DIET;
    use uuid::Uuid;

    #[test]
    fn default_profile_uses_general_diet() {
        let profile = UserProfile::new(Uuid::new_v4());
        assert_eq!(profile.dietary_habit, GENERAL_DIET);
        assert!(profile.health_goals.is_empty());
        assert!(profile.allergens.is_empty());
    }

    #[test]
    fn toggling_goal_twice_restores_profile() {
        let mut profile = UserProfile::new(Uuid::new_v4());
        profile.toggle_goal("增肌");
        let before = profile.clone();
        profile.toggle_goal("減脂");
        profile.toggle_goal("減脂");
        assert_eq!(profile, before);
    }

    #[test]
    fn blank_diet_falls_back_to_general() {
        let mut profile = UserProfile::new(Uuid::new_v4());
        profile.set_dietary_habit("全素");
        assert_eq!(profile.dietary_habit, "全素");
        profile.set_dietary_habit("  ");
        assert_eq!(profile.dietary_habit, GENERAL_DIET);
    }
}
