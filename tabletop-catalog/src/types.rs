//! Data model types for the board-game collection.
//!
//! These types represent the persistent collection schema: games, play
//! sessions, tags, and the game/tag join.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Notional purchase cost used by the cost-per-session metric.
pub const NOTIONAL_GAME_COST: f64 = 500.0;

// ── Enums ───────────────────────────────────────────────────────────────────

/// Broad genre of a board game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Strategy,
    Detective,
    Cooperative,
    Economic,
    Card,
    Family,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Self::Strategy,
        Self::Detective,
        Self::Cooperative,
        Self::Economic,
        Self::Card,
        Self::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strategy => "strategy",
            Self::Detective => "detective",
            Self::Cooperative => "cooperative",
            Self::Economic => "economic",
            Self::Card => "card",
            Self::Family => "family",
        }
    }

    /// Parse a stored or user-typed genre. Unknown strings fall back to `Strategy`.
    pub fn from_str_loose(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Strategy)
    }

    /// Strict parse, accepting the snake_case form and a few aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strategy" => Some(Self::Strategy),
            "detective" => Some(Self::Detective),
            "cooperative" | "coop" | "co-op" => Some(Self::Cooperative),
            "economic" | "economy" => Some(Self::Economic),
            "card" | "cards" => Some(Self::Card),
            "family" => Some(Self::Family),
            _ => None,
        }
    }
}

/// How demanding a game's rules are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Medium)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" | "normal" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// Ownership status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InCollection,
    WantToBuy,
    ForSale,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InCollection
    }
}

impl GameStatus {
    pub const ALL: [GameStatus; 3] = [Self::InCollection, Self::WantToBuy, Self::ForSale];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InCollection => "in_collection",
            Self::WantToBuy => "want_to_buy",
            Self::ForSale => "for_sale",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "in_collection" | "owned" => Some(Self::InCollection),
            "want_to_buy" | "wishlist" => Some(Self::WantToBuy),
            "for_sale" | "selling" => Some(Self::ForSale),
            _ => None,
        }
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A catalog entry for one board game, with its sessions and tags attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Assigned by the repository. Zero until the game is persisted.
    pub id: i64,
    pub title: String,
    pub genre: Genre,
    pub difficulty: Difficulty,
    pub min_players: u32,
    pub max_players: u32,
    /// Typical play time in minutes.
    pub play_time: u32,
    pub publisher: Option<String>,
    pub year_published: u32,
    pub bgg_rating: Option<f64>,
    pub personal_rating: u8,
    pub status: GameStatus,
    pub date_added: NaiveDateTime,
    pub last_played: Option<NaiveDateTime>,
    #[serde(default)]
    pub sessions: Vec<GameSession>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Game {
    /// A new, unsaved game with the data-entry defaults of the collection form.
    pub fn new(title: impl Into<String>, date_added: NaiveDateTime) -> Self {
        Self {
            id: 0,
            title: title.into(),
            genre: Genre::Strategy,
            difficulty: Difficulty::Medium,
            min_players: 1,
            max_players: 4,
            play_time: 60,
            publisher: None,
            year_published: chrono::Datelike::year(&date_added) as u32,
            bgg_rating: None,
            personal_rating: 5,
            status: GameStatus::InCollection,
            date_added,
            last_played: None,
            sessions: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// True when no play session has been recorded.
    pub fn is_unplayed(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Notional cost divided by the number of recorded sessions.
    pub fn cost_per_session(&self) -> f64 {
        crate::stats::cost_per_session(self.sessions.len())
    }

    pub fn average_session_rating(&self) -> f64 {
        crate::stats::average_session_rating(&self.sessions)
    }

    /// Player count suggested for a new session: the middle of the range.
    pub fn suggested_players(&self) -> u32 {
        self.min_players + self.max_players.saturating_sub(self.min_players) / 2
    }
}

// ── Session ─────────────────────────────────────────────────────────────────

/// One recorded play of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: i64,
    pub game_id: i64,
    pub session_date: NaiveDateTime,
    pub players_count: u32,
    pub results: String,
    pub session_rating: u8,
}

// ── Tags ────────────────────────────────────────────────────────────────────

/// A user-defined label. The name is the filter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A game/tag association. Owns neither endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameTag {
    pub game_id: i64,
    pub tag_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn enum_strings_round_trip() {
        for g in Genre::ALL {
            assert_eq!(Genre::from_str_loose(g.as_str()), g);
        }
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str_loose(d.as_str()), d);
        }
        for s in GameStatus::ALL {
            assert_eq!(GameStatus::from_str_loose(s.as_str()), s);
        }
    }

    #[test]
    fn loose_parsing_accepts_aliases() {
        assert_eq!(Genre::parse("Co-op"), Some(Genre::Cooperative));
        assert_eq!(GameStatus::parse("want-to-buy"), Some(GameStatus::WantToBuy));
        assert_eq!(Difficulty::parse("nope"), None);
        assert_eq!(GameStatus::from_str_loose("garbage"), GameStatus::InCollection);
    }

    #[test]
    fn new_game_uses_form_defaults() {
        let game = Game::new("Azul", date());
        assert_eq!(game.id, 0);
        assert_eq!(game.year_published, 2024);
        assert_eq!((game.min_players, game.max_players), (1, 4));
        assert_eq!(game.play_time, 60);
        assert_eq!(game.personal_rating, 5);
        assert!(game.is_unplayed());
    }

    #[test]
    fn suggested_players_is_middle_of_range() {
        let mut game = Game::new("Azul", date());
        game.min_players = 2;
        game.max_players = 5;
        assert_eq!(game.suggested_players(), 3);
    }
}
