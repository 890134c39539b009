//! Field validation for data entry.
//!
//! Runs before a game, session or tag is handed to the repository. Every
//! failing field is reported, not just the first.

use std::fmt;

use thiserror::Error;

use crate::types::{Game, GameSession};

pub const TITLE_MAX_CHARS: usize = 100;
pub const TAG_NAME_MAX_CHARS: usize = 50;
pub const PLAYERS_RANGE: (u32, u32) = (1, 20);
pub const PLAY_TIME_RANGE: (u32, u32) = (5, 600);
pub const YEAR_RANGE: (u32, u32) = (1900, 2100);
pub const RATING_RANGE: (u8, u8) = (1, 10);

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Players,
    PlayTime,
    YearPublished,
    BggRating,
    PersonalRating,
    SessionRating,
    PlayersCount,
    TagName,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Players => "players",
            Self::PlayTime => "play_time",
            Self::YearPublished => "year_published",
            Self::BggRating => "bgg_rating",
            Self::PersonalRating => "personal_rating",
            Self::SessionRating => "session_rating",
            Self::PlayersCount => "players_count",
            Self::TagName => "tag_name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All failing fields of one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

fn in_range<T: PartialOrd>(value: T, (lo, hi): (T, T)) -> bool {
    value >= lo && value <= hi
}

pub fn validate_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        Some("title is required".into())
    } else if title.chars().count() > TITLE_MAX_CHARS {
        Some(format!("title must not exceed {TITLE_MAX_CHARS} characters"))
    } else {
        None
    }
}

/// One message for the whole player range, checked in form order.
pub fn validate_players(min: u32, max: u32) -> Option<String> {
    let (lo, hi) = PLAYERS_RANGE;
    if !in_range(min, PLAYERS_RANGE) {
        Some(format!("minimum players must be between {lo} and {hi}"))
    } else if !in_range(max, PLAYERS_RANGE) {
        Some(format!("maximum players must be between {lo} and {hi}"))
    } else if min > max {
        Some("minimum players cannot exceed maximum players".into())
    } else {
        None
    }
}

pub fn validate_tag_name(name: &str) -> Result<(), ValidationErrors> {
    let mut errors = Collector::default();
    if name.trim().is_empty() {
        errors.push(Field::TagName, "tag name is required");
    } else if name.chars().count() > TAG_NAME_MAX_CHARS {
        errors.push(
            Field::TagName,
            format!("tag name must not exceed {TAG_NAME_MAX_CHARS} characters"),
        );
    }
    errors.finish()
}

pub fn validate_game(game: &Game) -> Result<(), ValidationErrors> {
    let mut errors = Collector::default();

    if let Some(msg) = validate_title(&game.title) {
        errors.push(Field::Title, msg);
    }
    if let Some(msg) = validate_players(game.min_players, game.max_players) {
        errors.push(Field::Players, msg);
    }
    if !in_range(game.play_time, PLAY_TIME_RANGE) {
        let (lo, hi) = PLAY_TIME_RANGE;
        errors.push(
            Field::PlayTime,
            format!("play time must be between {lo} and {hi} minutes"),
        );
    }
    if !in_range(game.year_published, YEAR_RANGE) {
        let (lo, hi) = YEAR_RANGE;
        errors.push(
            Field::YearPublished,
            format!("year published must be between {lo} and {hi}"),
        );
    }
    if let Some(rating) = game.bgg_rating {
        if !(1.0..=10.0).contains(&rating) {
            errors.push(Field::BggRating, "BGG rating must be between 1 and 10");
        }
    }
    if !in_range(game.personal_rating, RATING_RANGE) {
        errors.push(
            Field::PersonalRating,
            "personal rating must be between 1 and 10",
        );
    }

    errors.finish()
}

pub fn validate_session(session: &GameSession) -> Result<(), ValidationErrors> {
    let mut errors = Collector::default();
    if !in_range(session.session_rating, RATING_RANGE) {
        errors.push(Field::SessionRating, "session rating must be between 1 and 10");
    }
    if session.players_count == 0 {
        errors.push(Field::PlayersCount, "at least one player is required");
    }
    errors.finish()
}
