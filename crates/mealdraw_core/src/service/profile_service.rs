//! Profile use-case service.
//!
//! # Responsibility
//! - Load a user's preferences, falling back to defaults for new users.
//! - Save preferences with upsert semantics and re-read the stored state.
//!
//! # Invariants
//! - Saved goal/allergen lists are trimmed and free of duplicates.
//! - Every successful save returns the row as read back from storage.

use crate::model::profile::{UserId, UserProfile};
use crate::repo::profile_repo::ProfileRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ProfileServiceError {
    /// A goal or allergen entry is blank.
    InvalidValue(String),
    Repo(RepoError),
    /// Write succeeded but read-back did not find the row.
    InconsistentState(&'static str),
}

impl Display for ProfileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue(value) => write!(f, "invalid profile value: `{value}`"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent profile state: {details}"),
        }
    }
}

impl Error for ProfileServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProfileServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the stored profile or the defaults for a first visit.
    pub fn load_profile(&self, user_id: UserId) -> Result<UserProfile, ProfileServiceError> {
        match self.repo.get_profile(user_id) {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => Ok(UserProfile::new(user_id)),
            Err(err) => {
                error!(
                    "event=profile_load module=service status=error user_id={} error={}",
                    user_id, err
                );
                Err(err.into())
            }
        }
    }

    /// Upserts `profile` and returns the stored state.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile, ProfileServiceError> {
        let cleaned = clean_profile(profile)?;
        if let Err(err) = self.repo.upsert_profile(&cleaned) {
            error!(
                "event=profile_save module=service status=error user_id={} error={}",
                cleaned.user_id, err
            );
            return Err(err.into());
        }
        info!(
            "event=profile_save module=service status=ok user_id={} goals={} allergens={}",
            cleaned.user_id,
            cleaned.health_goals.len(),
            cleaned.allergens.len()
        );

        self.repo
            .get_profile(cleaned.user_id)?
            .ok_or(ProfileServiceError::InconsistentState(
                "saved profile not found in read-back",
            ))
    }

    /// Loads, edits and saves in one call.
    pub fn update_profile<F>(
        &self,
        user_id: UserId,
        edit: F,
    ) -> Result<UserProfile, ProfileServiceError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.load_profile(user_id)?;
        edit(&mut profile);
        profile.user_id = user_id;
        self.save_profile(&profile)
    }
}

fn clean_profile(profile: &UserProfile) -> Result<UserProfile, ProfileServiceError> {
    let mut cleaned = UserProfile::new(profile.user_id);
    cleaned.set_dietary_habit(&profile.dietary_habit);
    cleaned.health_goals = clean_list(&profile.health_goals)?;
    cleaned.allergens = clean_list(&profile.allergens)?;
    Ok(cleaned)
}

fn clean_list(values: &[String]) -> Result<Vec<String>, ProfileServiceError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ProfileServiceError::InvalidValue(value.clone()));
        }
        if !cleaned.iter().any(|existing| existing == trimmed) {
            cleaned.push(trimmed.to_string());
        }
    }
    Ok(cleaned)
}
