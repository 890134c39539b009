//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use tabletop_catalog::{Difficulty, FilterCriteria, GameStatus, Genre, Locale};

#[derive(Parser)]
#[command(name = "tabletop")]
#[command(about = "Catalog, filter and analyze a board-game collection", long_about = None)]
pub(crate) struct Cli {
    /// Path to the collection database (defaults to the configured location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter criteria shared by `list` and `stats`. Every flag is optional.
#[derive(Args, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Case-insensitive substring of title, publisher or tag name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Genre (strategy, detective, cooperative, economic, card, family)
    #[arg(short, long, value_parser = parse_genre)]
    pub genre: Option<Genre>,

    /// Difficulty (easy, medium, hard)
    #[arg(short, long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Game must support at least this many players
    #[arg(long)]
    pub min_players: Option<u32>,

    /// Game must support at most this many players
    #[arg(long)]
    pub max_players: Option<u32>,

    /// Minimum play time in minutes
    #[arg(long)]
    pub min_time: Option<u32>,

    /// Maximum play time in minutes
    #[arg(long)]
    pub max_time: Option<u32>,

    /// Ownership status (in_collection, want_to_buy, for_sale)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<GameStatus>,

    /// Tag names; a game matches if it carries any of them
    #[arg(short, long, value_delimiter = ',')]
    pub tag: Vec<String>,
}

impl FilterArgs {
    pub(crate) fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_term: self.search.clone(),
            genre: self.genre,
            difficulty: self.difficulty,
            min_players: self.min_players,
            max_players: self.max_players,
            min_play_time: self.min_time,
            max_play_time: self.max_time,
            status: self.status,
            tags: self.tag.iter().cloned().collect(),
        }
    }
}

/// Optional game attributes for `game add` and `game edit`.
#[derive(Args, Clone, Default)]
pub(crate) struct GameFieldArgs {
    #[arg(short, long, value_parser = parse_genre)]
    pub genre: Option<Genre>,

    #[arg(short, long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    #[arg(long)]
    pub min_players: Option<u32>,

    #[arg(long)]
    pub max_players: Option<u32>,

    /// Typical play time in minutes
    #[arg(long)]
    pub play_time: Option<u32>,

    /// Publisher name (pass an empty string to clear)
    #[arg(long)]
    pub publisher: Option<String>,

    /// Year of publication
    #[arg(long)]
    pub year: Option<u32>,

    /// BoardGameGeek rating (1.0 to 10.0)
    #[arg(long)]
    pub bgg_rating: Option<f64>,

    /// Personal rating (1 to 10)
    #[arg(short, long)]
    pub rating: Option<u8>,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<GameStatus>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List games matching the given filters
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the matching games as JSON
        #[arg(long)]
        json: bool,

        /// Label language (en, ru); defaults to the configured locale
        #[arg(long, value_parser = parse_locale)]
        lang: Option<Locale>,
    },

    /// Show collection statistics, optionally over a filtered subset
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Recommend highly rated games in your favourite genres
    Recommend {
        /// Print the recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add, edit, delete or inspect a game
    Game {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Record and review play sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Database maintenance
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum GameAction {
    /// Add a new game to the collection
    Add {
        /// Game title
        title: String,

        #[command(flatten)]
        fields: GameFieldArgs,

        /// Tags to attach (created if missing)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Change attributes of an existing game
    Edit {
        /// Game id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: GameFieldArgs,
    },

    /// Delete a game with its sessions and tag links
    Delete {
        /// Game id
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },

    /// Show one game with its sessions and tags
    Show {
        /// Game id
        id: i64,
    },
}

#[derive(Subcommand)]
pub(crate) enum SessionAction {
    /// Record a play session
    Add {
        /// Game id
        game_id: i64,

        /// Session rating (1 to 10)
        #[arg(short, long)]
        rating: u8,

        /// Number of players (defaults to the middle of the game's range)
        #[arg(short, long)]
        players: Option<u32>,

        /// Free-form notes on the outcome
        #[arg(long, default_value = "")]
        results: String,

        /// Session date, YYYY-MM-DD (defaults to now)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the sessions of a game
    History {
        /// Game id
        game_id: i64,
    },
}

#[derive(Subcommand)]
pub(crate) enum TagAction {
    /// List tags with the number of games carrying each
    List,

    /// Create a tag
    Add {
        /// Tag name
        name: String,
    },

    /// Replace the tags of a game (no names clears them)
    Set {
        /// Game id
        game_id: i64,

        /// Tag names (created if missing)
        #[arg(value_delimiter = ',')]
        names: Vec<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum DbAction {
    /// Load sample data into an empty database
    Seed {
        /// YAML fixture file or directory of fixtures (defaults to the bundled sample)
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Seed even if the database already holds games
        #[arg(long)]
        force: bool,
    },

    /// Delete all data and reseed
    Reset {
        /// Confirm the reset
        #[arg(long)]
        confirm: bool,

        /// Leave the database empty instead of reseeding
        #[arg(long)]
        empty: bool,

        /// YAML fixture file or directory to reseed from
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Print the resolved database path
    Path,

    /// Show row counts per table
    Stats,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings
    Show,

    /// Print the settings file path
    Path,

    /// Save the default database path (omit to clear)
    SetDb {
        path: Option<PathBuf>,
    },

    /// Save the label language (en, ru)
    SetLang {
        #[arg(value_parser = parse_locale)]
        locale: Locale,
    },
}

fn parse_genre(s: &str) -> Result<Genre, String> {
    Genre::parse(s).ok_or_else(|| format!("unknown genre '{s}'"))
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn parse_status(s: &str) -> Result<GameStatus, String> {
    GameStatus::parse(s).ok_or_else(|| format!("unknown status '{s}'"))
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::from_code(s).ok_or_else(|| format!("unknown language '{s}' (expected en or ru)"))
}
