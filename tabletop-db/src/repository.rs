//! [`GameRepository`] backed by a single SQLite connection.

use std::path::Path;

use rusqlite::Connection;
use tabletop_catalog::{FilterCriteria, Game, GameRepository, GameSession, Tag};

use crate::operations::{self, OperationError};
use crate::queries;
use crate::schema::{self, SchemaError};

pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_database(path)?,
        })
    }

    /// A fresh in-memory store with the full schema.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    /// Wrap a connection opened with [`schema::open_database`] or
    /// [`schema::open_memory`].
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl GameRepository for SqliteRepository {
    type Error = OperationError;

    fn get_all_games(&self) -> Result<Vec<Game>, OperationError> {
        queries::get_all_games(&self.conn)
    }

    fn get_game_by_id(&self, id: i64) -> Result<Option<Game>, OperationError> {
        queries::get_game_by_id(&self.conn, id)
    }

    fn add_game(&self, game: &Game) -> Result<i64, OperationError> {
        operations::insert_game(&self.conn, game)
    }

    fn update_game(&self, game: &Game) -> Result<(), OperationError> {
        if !operations::update_game(&self.conn, game)? {
            log::debug!("update of unknown game {} ignored", game.id);
        }
        Ok(())
    }

    fn delete_game(&self, id: i64) -> Result<(), OperationError> {
        if !operations::delete_game(&self.conn, id)? {
            log::debug!("delete of unknown game {id} ignored");
        }
        Ok(())
    }

    fn add_game_session(&self, session: &GameSession) -> Result<i64, OperationError> {
        operations::insert_session(&self.conn, session)
    }

    fn update_game_tags(&self, game_id: i64, tag_ids: &[i64]) -> Result<(), OperationError> {
        operations::replace_game_tags(&self.conn, game_id, tag_ids)
    }

    fn get_games_by_filters(&self, criteria: &FilterCriteria) -> Result<Vec<Game>, OperationError> {
        queries::games_by_filters(&self.conn, criteria)
    }

    fn list_tags(&self) -> Result<Vec<Tag>, OperationError> {
        queries::list_tags(&self.conn)
    }

    fn add_tag(&self, name: &str) -> Result<i64, OperationError> {
        operations::insert_tag(&self.conn, name)
    }
}
