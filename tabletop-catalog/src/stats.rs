//! Aggregate statistics over a game collection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Game, GameSession, GameStatus, Genre, NOTIONAL_GAME_COST};

pub fn total_count(games: &[Game]) -> usize {
    games.len()
}

/// Count games per status. Statuses with no games are left out.
pub fn count_by_status(games: &[Game]) -> BTreeMap<GameStatus, usize> {
    let mut counts = BTreeMap::new();
    for game in games {
        *counts.entry(game.status).or_insert(0) += 1;
    }
    counts
}

/// Count games per genre. Genres with no games are left out.
pub fn count_by_genre(games: &[Game]) -> BTreeMap<Genre, usize> {
    let mut counts = BTreeMap::new();
    for game in games {
        *counts.entry(game.genre).or_insert(0) += 1;
    }
    counts
}

/// Games with no recorded session, in input order.
pub fn unplayed_games(games: &[Game]) -> Vec<&Game> {
    games.iter().filter(|g| g.is_unplayed()).collect()
}

/// Mean session rating, or 0 for an empty list.
pub fn average_session_rating(sessions: &[GameSession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let sum: u64 = sessions.iter().map(|s| u64::from(s.session_rating)).sum();
    sum as f64 / sessions.len() as f64
}

/// `500 / session_count`, or 0 when there are no sessions.
pub fn cost_per_session(session_count: usize) -> f64 {
    if session_count == 0 {
        0.0
    } else {
        NOTIONAL_GAME_COST / session_count as f64
    }
}

/// Summary shown alongside a (possibly filtered) game list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub by_status: BTreeMap<GameStatus, usize>,
    pub by_genre: BTreeMap<Genre, usize>,
    pub unplayed: usize,
}

impl CollectionStats {
    pub fn compute(games: &[Game]) -> Self {
        Self {
            total: total_count(games),
            by_status: count_by_status(games),
            by_genre: count_by_genre(games),
            unplayed: unplayed_games(games).len(),
        }
    }

    /// Same as [`compute`](Self::compute) for a borrowed subset.
    pub fn compute_refs(games: &[&Game]) -> Self {
        let mut stats = Self {
            total: games.len(),
            ..Self::default()
        };
        for game in games {
            *stats.by_status.entry(game.status).or_insert(0) += 1;
            *stats.by_genre.entry(game.genre).or_insert(0) += 1;
            if game.is_unplayed() {
                stats.unplayed += 1;
            }
        }
        stats
    }
}

/// Per-game session history figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub sessions: usize,
    pub average_rating: f64,
    pub cost_per_session: f64,
}

impl SessionSummary {
    pub fn for_game(game: &Game) -> Self {
        Self {
            sessions: game.sessions.len(),
            average_rating: average_session_rating(&game.sessions),
            cost_per_session: cost_per_session(game.sessions.len()),
        }
    }
}
