//! Recommendation policy: seed by top personal rating, expand by genre.
//!
//! 1. Seed: up to [`SEED_LIMIT`] games rated at least [`SEED_MIN_RATING`],
//!    best first.
//! 2. Expand: up to [`RESULT_LIMIT`] games sharing a seed genre and rated at
//!    least [`RESULT_MIN_RATING`], best first. Seed games may reappear.
//! 3. If the seed is empty, return the first [`RESULT_LIMIT`] unplayed games.
//!
//! Ties keep input order. The fallback only fires on an empty seed, never on
//! a short result.

use std::collections::BTreeSet;

use crate::types::{Game, Genre};

pub const SEED_MIN_RATING: u8 = 8;
pub const SEED_LIMIT: usize = 3;
pub const RESULT_MIN_RATING: u8 = 7;
pub const RESULT_LIMIT: usize = 5;

/// Games with `personal_rating >= min_rating`, best first, stable on ties.
fn top_rated(games: &[Game], min_rating: u8) -> Vec<&Game> {
    let mut rated: Vec<&Game> = games
        .iter()
        .filter(|g| g.personal_rating >= min_rating)
        .collect();
    rated.sort_by(|a, b| b.personal_rating.cmp(&a.personal_rating));
    rated
}

/// Distinct genres among the seed games.
pub fn seed_genres(games: &[Game]) -> BTreeSet<Genre> {
    top_rated(games, SEED_MIN_RATING)
        .into_iter()
        .take(SEED_LIMIT)
        .map(|g| g.genre)
        .collect()
}

pub fn recommended_games(games: &[Game]) -> Vec<&Game> {
    let genres = seed_genres(games);

    if genres.is_empty() {
        log::debug!("no game rated {SEED_MIN_RATING}+, recommending unplayed games");
        return games
            .iter()
            .filter(|g| g.is_unplayed())
            .take(RESULT_LIMIT)
            .collect();
    }

    let mut picks = top_rated(games, RESULT_MIN_RATING);
    picks.retain(|g| genres.contains(&g.genre));
    picks.truncate(RESULT_LIMIT);
    log::debug!(
        "recommending {} games from {} seed genres",
        picks.len(),
        genres.len()
    );
    picks
}
