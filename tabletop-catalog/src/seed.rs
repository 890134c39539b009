//! YAML loading for seed fixtures.
//!
//! A fixture describes a demo collection: tag names, games, the tags each game
//! carries, and its recorded sessions. Dates are given as "days ago" so the
//! fixture stays relative to the moment it is loaded.

use std::collections::HashSet;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Difficulty, Game, GameSession, GameStatus, Genre};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
    #[error("Game '{game}' references unknown tag '{tag}'")]
    UnknownTag { game: String, tag: String },
}

/// A whole fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFixture {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub games: Vec<SeedGame>,
}

/// A game entry in a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedGame {
    pub title: String,
    pub genre: Genre,
    pub difficulty: Difficulty,
    pub min_players: u32,
    pub max_players: u32,
    pub play_time: u32,
    #[serde(default)]
    pub publisher: Option<String>,
    pub year_published: u32,
    #[serde(default)]
    pub bgg_rating: Option<f64>,
    pub personal_rating: u8,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub added_days_ago: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sessions: Vec<SeedSession>,
}

/// A recorded play in a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSession {
    pub days_ago: i64,
    pub players: u32,
    #[serde(default)]
    pub results: String,
    pub rating: u8,
}

impl SeedGame {
    /// Build an unsaved [`Game`] without sessions or tags.
    pub fn to_game(&self, now: NaiveDateTime) -> Game {
        Game {
            id: 0,
            title: self.title.clone(),
            genre: self.genre,
            difficulty: self.difficulty,
            min_players: self.min_players,
            max_players: self.max_players,
            play_time: self.play_time,
            publisher: self.publisher.clone(),
            year_published: self.year_published,
            bgg_rating: self.bgg_rating,
            personal_rating: self.personal_rating,
            status: self.status,
            date_added: now - Duration::days(self.added_days_ago),
            last_played: None,
            sessions: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl SeedSession {
    pub fn to_session(&self, game_id: i64, now: NaiveDateTime) -> GameSession {
        GameSession {
            id: 0,
            game_id,
            session_date: now - Duration::days(self.days_ago),
            players_count: self.players,
            results: self.results.clone(),
            session_rating: self.rating,
        }
    }
}

impl SeedFixture {
    /// Check that every game only references declared tags.
    pub fn check_tags(&self) -> Result<(), SeedError> {
        let declared: HashSet<&str> = self.tags.iter().map(String::as_str).collect();
        for game in &self.games {
            if let Some(tag) = game.tags.iter().find(|t| !declared.contains(t.as_str())) {
                return Err(SeedError::UnknownTag {
                    game: game.title.clone(),
                    tag: tag.clone(),
                });
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: SeedFixture) {
        for tag in other.tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self.games.extend(other.games);
    }
}

/// Parse a fixture from a YAML string. `origin` is used in error messages.
pub fn parse_fixture(contents: &str, origin: &str) -> Result<SeedFixture, SeedError> {
    let fixture = parse_unchecked(contents, origin)?;
    fixture.check_tags()?;
    Ok(fixture)
}

fn parse_unchecked(contents: &str, origin: &str) -> Result<SeedFixture, SeedError> {
    serde_yml::from_str(contents).map_err(|e| SeedError::Parse {
        path: origin.to_string(),
        source: e,
    })
}

fn read_unchecked(path: &Path) -> Result<SeedFixture, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SeedError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_unchecked(&contents, &path.display().to_string())
}

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> Result<SeedFixture, SeedError> {
    let fixture = read_unchecked(path)?;
    fixture.check_tags()?;
    Ok(fixture)
}

/// Load and merge every `.yaml`/`.yml` fixture in a directory, by file name.
///
/// Tag references are checked once, against the merged tag list, so a game
/// may use a tag declared in another file. A missing directory yields an
/// empty fixture.
pub fn load_fixture_dir(dir: &Path) -> Result<SeedFixture, SeedError> {
    if !dir.exists() {
        return Ok(SeedFixture::default());
    }
    if !dir.is_dir() {
        return Err(SeedError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| SeedError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut merged = SeedFixture::default();
    for entry in entries {
        merged.merge(read_unchecked(&entry.path())?);
    }
    merged.check_tags()?;
    Ok(merged)
}
