//! Uniform random draw over filtered collections.
//!
//! # Responsibility
//! - Pick one eligible item uniformly at random.
//! - Report "no match" as a normal outcome when nothing is eligible.
//! - Provide the stable per-day pick and tip rotation used by the home view.
//!
//! # Invariants
//! - A drawn item always passes every active group of the filter set.
//! - Drawing never panics, including on empty input.

use crate::filter::group::{FilterSet, Taggable};
use chrono::{Datelike, NaiveDate};
use rand::Rng;

const DAILY_SEED_MULTIPLIER: u64 = 9301;
const DAILY_SEED_INCREMENT: u64 = 49297;
const DAILY_SEED_MODULUS: u64 = 233280;
const DAILY_SEED_ROUNDS: usize = 5;

/// Result of one draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome<T> {
    /// An eligible item was selected out of `eligible` candidates.
    Picked { item: T, eligible: usize },
    /// No item survived the filters. `catalog_size` is the unfiltered count,
    /// so callers can tell an empty catalog from over-narrow filters.
    NoMatch { catalog_size: usize },
}

impl<T> DrawOutcome<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Picked { item, .. } => Some(item),
            Self::NoMatch { .. } => None,
        }
    }

    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Picked { item, .. } => Some(item),
            Self::NoMatch { .. } => None,
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}

/// Picks one element uniformly: `index = floor(random() * len)`.
///
/// Returns `None` for an empty slice.
pub fn pick_uniform<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    let roll: f64 = rng.gen();
    let index = (roll * items.len() as f64).floor() as usize;
    items.get(index.min(items.len() - 1))
}

/// Filters `items` with `filters` and draws one survivor.
pub fn draw<T, R>(items: &[T], filters: &FilterSet, rng: &mut R) -> DrawOutcome<T>
where
    T: Taggable + Clone,
    R: Rng + ?Sized,
{
    let eligible = filters.eligible(items);
    match pick_uniform(&eligible, rng) {
        Some(item) => DrawOutcome::Picked {
            item: (*item).clone(),
            eligible: eligible.len(),
        },
        None => DrawOutcome::NoMatch {
            catalog_size: items.len(),
        },
    }
}

/// Returns a stable index for `date`, identical for every call on that day.
///
/// The seed is the date as `YYYYMMDD`, mixed through a small linear
/// congruential generator. Returns `None` when `len == 0`.
pub fn daily_index(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut seed = date.year().max(0) as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64;
    for _ in 0..DAILY_SEED_ROUNDS {
        seed = (seed * DAILY_SEED_MULTIPLIER + DAILY_SEED_INCREMENT) % DAILY_SEED_MODULUS;
    }
    let index = ((seed as f64 / DAILY_SEED_MODULUS as f64) * len as f64).floor() as usize;
    Some(index.min(len - 1))
}

/// Advances a rotating carousel position.
pub fn next_tip_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::{daily_index, next_tip_index, pick_uniform};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_uniform_on_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: [u8; 0] = [];
        assert!(pick_uniform(&empty, &mut rng).is_none());
    }

    #[test]
    fn pick_uniform_reaches_every_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = [0usize, 1, 2, 3];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let picked = pick_uniform(&items, &mut rng).unwrap();
            seen[*picked] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn daily_index_is_stable_within_a_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let first = daily_index(date, 37).unwrap();
        assert_eq!(daily_index(date, 37), Some(first));
        assert!(first < 37);
        assert_eq!(daily_index(date, 0), None);
    }

    #[test]
    fn daily_index_matches_reference_sequence() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let mut seed: u64 = 20240517;
        for _ in 0..5 {
            seed = (seed * 9301 + 49297) % 233280;
        }
        let expected = ((seed as f64 / 233280.0) * 10.0).floor() as usize;
        assert_eq!(daily_index(date, 10), Some(expected));
    }

    #[test]
    fn tip_rotation_wraps() {
        assert_eq!(next_tip_index(0, 3), 1);
        assert_eq!(next_tip_index(2, 3), 0);
        assert_eq!(next_tip_index(5, 0), 0);
    }
}
