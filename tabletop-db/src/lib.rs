//! SQLite persistence layer for the game collection.
//!
//! Provides schema creation, CRUD operations, query APIs and the
//! [`SqliteRepository`] implementation of
//! [`GameRepository`](tabletop_catalog::GameRepository), backed by SQLite
//! (via rusqlite with the bundled feature).

pub mod operations;
pub mod queries;
pub mod repository;
pub mod schema;

pub use operations::{
    clear_collection, delete_game, find_tag_by_name, insert_game, insert_session, insert_tag,
    replace_game_tags, seed_from_fixture, update_game, OperationError, SeedStats,
};
pub use queries::{
    games_by_filters, get_all_games, get_game_by_id, list_tags, sessions_for_game, store_stats,
    tag_usage, StoreStats,
};
pub use repository::SqliteRepository;
pub use schema::{open_database, open_memory, SchemaError};
