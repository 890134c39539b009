//! Board-game collection data model, filtering and statistics.
//!
//! This crate defines the collection types and the pure filter/statistics
//! engine without any database dependencies. `tabletop-db` implements the
//! [`GameRepository`] contract on top of SQLite.

pub mod filter;
pub mod index;
pub mod labels;
pub mod recommend;
pub mod repository;
pub mod seed;
pub mod stats;
pub mod types;
pub mod validation;

pub use filter::{filter_games, fold_case, FilterCriteria};
pub use index::TagIndex;
pub use labels::{Labelled, Locale};
pub use recommend::recommended_games;
pub use repository::GameRepository;
pub use seed::{load_fixture, load_fixture_dir, parse_fixture, SeedError, SeedFixture};
pub use stats::{
    average_session_rating, cost_per_session, count_by_genre, count_by_status, total_count,
    unplayed_games, CollectionStats, SessionSummary,
};
pub use types::*;
pub use validation::{validate_game, validate_session, validate_tag_name, ValidationErrors};
