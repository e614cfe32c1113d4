//! User profile repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `upsert_profile` matches on the user id and overwrites every column
//!   (last write wins).
//! - Stored list columns may be JSON arrays or legacy brace strings; both
//!   decode to the same case-preserving list.

use crate::model::profile::{UserId, UserProfile};
use crate::model::tags::TagField;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Repository interface for `user_profiles`.
pub trait ProfileRepository {
    /// Returns `None` when the user never saved a profile.
    fn get_profile(&self, user_id: UserId) -> RepoResult<Option<UserProfile>>;
    fn upsert_profile(&self, profile: &UserProfile) -> RepoResult<()>;
}

pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn get_profile(&self, user_id: UserId) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, health_goals, dietary_habit, allergens
             FROM user_profiles
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let id_text: String = row.get("id")?;
        let stored_id = Uuid::parse_str(&id_text).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{id_text}` in user_profiles.id"))
        })?;
        let goals: String = row.get("health_goals")?;
        let allergens: String = row.get("allergens")?;

        Ok(Some(UserProfile {
            user_id: stored_id,
            health_goals: TagField::from_stored(&goals).display_tags(),
            dietary_habit: row.get("dietary_habit")?,
            allergens: TagField::from_stored(&allergens).display_tags(),
        }))
    }

    fn upsert_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO user_profiles (id, health_goals, dietary_habit, allergens)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                health_goals = excluded.health_goals,
                dietary_habit = excluded.dietary_habit,
                allergens = excluded.allergens,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                profile.user_id.to_string(),
                TagField::List(profile.health_goals.clone()).to_stored(),
                profile.dietary_habit.as_str(),
                TagField::List(profile.allergens.clone()).to_stored(),
            ],
        )?;
        Ok(())
    }
}
