//! Multi-criteria filtering over a game collection.
//!
//! [`FilterCriteria`] holds independently optional predicates. Present
//! predicates combine with AND; the tag set matches with OR inside itself.
//! Filtering is a pure function of `(games, criteria)` and keeps input order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, Game, GameStatus, Genre};

/// Case folding shared by the in-memory filter and the SQLite store.
///
/// Maps each char through its Unicode lowercase form, so Cyrillic titles
/// fold the same way as ASCII ones. No context-sensitive rules apply: a
/// word-final `Σ` folds to `σ` like any other.
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Optional filter predicates. An absent field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Substring searched in title, publisher and tag names.
    pub search_term: Option<String>,
    pub genre: Option<Genre>,
    pub difficulty: Option<Difficulty>,
    /// Keep games whose `max_players` reaches at least this many.
    pub min_players: Option<u32>,
    /// Keep games whose `min_players` does not exceed this many.
    pub max_players: Option<u32>,
    pub min_play_time: Option<u32>,
    pub max_play_time: Option<u32>,
    pub status: Option<GameStatus>,
    /// Keep games carrying any of these tag names. Empty means absent.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn min_players(mut self, n: u32) -> Self {
        self.min_players = Some(n);
        self
    }

    pub fn max_players(mut self, n: u32) -> Self {
        self.max_players = Some(n);
        self
    }

    pub fn min_play_time(mut self, minutes: u32) -> Self {
        self.min_play_time = Some(minutes);
        self
    }

    pub fn max_play_time(mut self, minutes: u32) -> Self {
        self.max_play_time = Some(minutes);
        self
    }

    pub fn status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.tags.insert(name.into());
        self
    }

    pub fn tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(names.into_iter().map(Into::into));
        self
    }

    /// The search term as it is matched: trimmed and case-folded.
    ///
    /// Returns `None` for an absent, empty or whitespace-only term.
    pub fn normalized_search_term(&self) -> Option<String> {
        let term = self.search_term.as_deref()?.trim();
        if term.is_empty() {
            None
        } else {
            Some(fold_case(term))
        }
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.normalized_search_term().is_none()
            && self.genre.is_none()
            && self.difficulty.is_none()
            && self.min_players.is_none()
            && self.max_players.is_none()
            && self.min_play_time.is_none()
            && self.max_play_time.is_none()
            && self.status.is_none()
            && self.tags.is_empty()
    }

    /// Check a single game against every active predicate.
    pub fn matches(&self, game: &Game) -> bool {
        if let Some(term) = self.normalized_search_term() {
            if !matches_search(game, &term) {
                return false;
            }
        }
        self.matches_attributes(game) && self.matches_tags(game)
    }

    fn matches_attributes(&self, game: &Game) -> bool {
        self.genre.is_none_or(|g| game.genre == g)
            && self.difficulty.is_none_or(|d| game.difficulty == d)
            && self.min_players.is_none_or(|n| game.max_players >= n)
            && self.max_players.is_none_or(|n| game.min_players <= n)
            && self.min_play_time.is_none_or(|t| game.play_time >= t)
            && self.max_play_time.is_none_or(|t| game.play_time <= t)
            && self.status.is_none_or(|s| game.status == s)
    }

    fn matches_tags(&self, game: &Game) -> bool {
        self.tags.is_empty() || game.tags.iter().any(|t| self.tags.contains(&t.name))
    }
}

/// `term` must already be trimmed and folded.
fn matches_search(game: &Game, term: &str) -> bool {
    fold_case(&game.title).contains(term)
        || game
            .publisher
            .as_deref()
            .is_some_and(|p| fold_case(p).contains(term))
        || game.tags.iter().any(|t| fold_case(&t.name).contains(term))
}

/// Return the games matching `criteria`, in input order.
pub fn filter_games<'a>(games: &'a [Game], criteria: &FilterCriteria) -> Vec<&'a Game> {
    // Normalize once instead of per game.
    let term = criteria.normalized_search_term();
    let result: Vec<&Game> = games
        .iter()
        .filter(|g| term.as_deref().is_none_or(|t| matches_search(g, t)))
        .filter(|g| criteria.matches_attributes(g) && criteria.matches_tags(g))
        .collect();
    log::debug!("filter kept {} of {} games", result.len(), games.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;

    fn game(id: i64, title: &str, genre: Genre, players: (u32, u32)) -> Game {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut g = Game::new(title, date);
        g.id = id;
        g.genre = genre;
        g.min_players = players.0;
        g.max_players = players.1;
        g
    }

    #[test]
    fn fold_case_is_per_char() {
        assert_eq!(fold_case("КАТАН Catan"), "катан catan");
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("ΟΔΟΣ"), fold_case("οδοσ"));
    }

    #[test]
    fn search_matches_final_sigma_in_any_case() {
        let games = vec![game(1, "ΟΔΟΣ", Genre::Family, (2, 4))];
        let upper = filter_games(&games, &FilterCriteria::new().search("ΟΣ"));
        let lower = filter_games(&games, &FilterCriteria::new().search("οσ"));
        assert_eq!(upper.len(), 1);
        assert_eq!(lower.len(), 1);
    }

    fn tagged(mut g: Game, tags: &[(i64, &str)]) -> Game {
        g.tags = tags
            .iter()
            .map(|(id, name)| Tag {
                id: *id,
                name: name.to_string(),
            })
            .collect();
        g
    }

    fn ids(games: &[&Game]) -> Vec<i64> {
        games.iter().map(|g| g.id).collect()
    }

    #[test]
    fn whitespace_search_term_is_absent() {
        let c = FilterCriteria::new().search("   \t ");
        assert_eq!(c.normalized_search_term(), None);
        assert!(c.is_empty());
    }

    #[test]
    fn search_term_is_trimmed_and_folded() {
        let c = FilterCriteria::new().search("  КаТ ");
        assert_eq!(c.normalized_search_term().as_deref(), Some("кат"));
    }

    #[test]
    fn search_matches_tag_names() {
        let games = vec![
            tagged(game(1, "Azul", Genre::Family, (2, 4)), &[(1, "Abstract")]),
            game(2, "Root", Genre::Strategy, (2, 4)),
        ];
        let c = FilterCriteria::new().search("abstr");
        assert_eq!(ids(&filter_games(&games, &c)), vec![1]);
    }

    #[test]
    fn null_publisher_never_matches_search() {
        let g = game(1, "Root", Genre::Strategy, (2, 4));
        assert!(g.publisher.is_none());
        assert!(!FilterCriteria::new().search("leder").matches(&g));
    }

    #[test]
    fn tag_filter_is_or_within_the_set() {
        let games = vec![
            tagged(game(1, "A", Genre::Card, (2, 4)), &[(1, "party")]),
            tagged(game(2, "B", Genre::Card, (2, 4)), &[(2, "short")]),
            tagged(game(3, "C", Genre::Card, (2, 4)), &[(3, "kids")]),
            game(4, "D", Genre::Card, (2, 4)),
        ];
        let c = FilterCriteria::new().tags(["party", "short"]);
        assert_eq!(ids(&filter_games(&games, &c)), vec![1, 2]);
    }

    #[test]
    fn tag_set_match_is_exact() {
        let g = tagged(game(1, "A", Genre::Card, (2, 4)), &[(1, "Party")]);
        assert!(!FilterCriteria::new().tag("party").matches(&g));
        assert!(FilterCriteria::new().tag("Party").matches(&g));
    }

    #[test]
    fn player_bounds_check_range_overlap() {
        let games = vec![
            game(1, "Solo", Genre::Card, (1, 1)),
            game(2, "Duel", Genre::Card, (2, 2)),
            game(3, "Big", Genre::Card, (5, 10)),
        ];
        let c = FilterCriteria::new().min_players(2).max_players(4);
        assert_eq!(ids(&filter_games(&games, &c)), vec![2]);
    }

    #[test]
    fn play_time_bounds_are_inclusive() {
        let mut a = game(1, "A", Genre::Card, (2, 4));
        a.play_time = 30;
        let mut b = game(2, "B", Genre::Card, (2, 4));
        b.play_time = 90;
        let games = vec![a, b];
        let c = FilterCriteria::new().min_play_time(30).max_play_time(30);
        assert_eq!(ids(&filter_games(&games, &c)), vec![1]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let c = FilterCriteria::new().genre(Genre::Strategy);
        assert!(filter_games(&[], &c).is_empty());
    }
}
