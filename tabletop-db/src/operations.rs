//! Write operations for games, sessions and tags.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use tabletop_catalog::{Game, GameSession, GameTag, SeedFixture};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game. `game.id` is ignored; returns the generated id.
pub fn insert_game(conn: &Connection, game: &Game) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO games (title, genre, difficulty, min_players, max_players, play_time,
             publisher, year_published, bgg_rating, personal_rating, status,
             date_added, last_played)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            game.title,
            game.genre.as_str(),
            game.difficulty.as_str(),
            game.min_players,
            game.max_players,
            game.play_time,
            game.publisher,
            game.year_published,
            game.bgg_rating,
            game.personal_rating,
            game.status.as_str(),
            game.date_added,
            game.last_played,
        ],
    )?;
    let id = conn.last_insert_rowid();
    log::debug!("inserted game {id} '{}'", game.title);
    Ok(id)
}

/// Overwrite the attributes of an existing game.
///
/// Sessions, tags and `date_added` are left alone. Returns `false` when no
/// game has `game.id`.
pub fn update_game(conn: &Connection, game: &Game) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "UPDATE games SET
             title = ?2,
             genre = ?3,
             difficulty = ?4,
             min_players = ?5,
             max_players = ?6,
             play_time = ?7,
             publisher = ?8,
             year_published = ?9,
             bgg_rating = ?10,
             personal_rating = ?11,
             status = ?12,
             last_played = ?13
         WHERE id = ?1",
        params![
            game.id,
            game.title,
            game.genre.as_str(),
            game.difficulty.as_str(),
            game.min_players,
            game.max_players,
            game.play_time,
            game.publisher,
            game.year_published,
            game.bgg_rating,
            game.personal_rating,
            game.status.as_str(),
            game.last_played,
        ],
    )?;
    Ok(changed > 0)
}

/// Delete a game. Sessions and tag links go with it through the foreign keys.
///
/// Returns `false` when the id is unknown.
pub fn delete_game(conn: &Connection, id: i64) -> Result<bool, OperationError> {
    let changed = conn.execute("DELETE FROM games WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

// ── Session Operations ──────────────────────────────────────────────────────

/// Record a session and set the game's `last_played` to its date.
pub fn insert_session(conn: &Connection, session: &GameSession) -> Result<i64, OperationError> {
    let tx = conn.unchecked_transaction()?;

    let changed = tx.execute(
        "UPDATE games SET last_played = ?2 WHERE id = ?1",
        params![session.game_id, session.session_date],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "game".to_string(),
            id: session.game_id.to_string(),
        });
    }

    let id = insert_session_row(&tx, session)?;
    tx.commit()?;

    log::debug!("recorded session {id} for game {}", session.game_id);
    Ok(id)
}

fn insert_session_row(conn: &Connection, session: &GameSession) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO sessions (game_id, session_date, players_count, results, session_rating)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.game_id,
            session.session_date,
            session.players_count,
            session.results,
            session.session_rating,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Tag Operations ──────────────────────────────────────────────────────────

/// Insert a tag, or return the id of the existing tag with this name.
pub fn insert_tag(conn: &Connection, name: &str) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT OR IGNORE INTO tags (name) VALUES (?1)",
        params![name],
    )?;
    let id = conn.query_row(
        "SELECT id FROM tags WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Find a tag id by exact name.
pub fn find_tag_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM tags WHERE name = ?1",
        params![name],
        |row| row.get::<_, i64>(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replace the full tag set of a game. Duplicate ids are collapsed.
pub fn replace_game_tags(
    conn: &Connection,
    game_id: i64,
    tag_ids: &[i64],
) -> Result<(), OperationError> {
    let links: BTreeSet<GameTag> = tag_ids
        .iter()
        .map(|&tag_id| GameTag { game_id, tag_id })
        .collect();

    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM game_tags WHERE game_id = ?1", params![game_id])?;
    for link in &links {
        insert_link(&tx, link)?;
    }
    tx.commit()?;
    log::debug!("game {game_id} now has {} tags", links.len());
    Ok(())
}

fn insert_link(conn: &Connection, link: &GameTag) -> Result<(), OperationError> {
    conn.execute(
        "INSERT OR IGNORE INTO game_tags (game_id, tag_id) VALUES (?1, ?2)",
        params![link.game_id, link.tag_id],
    )?;
    Ok(())
}

// ── Bulk Operations ─────────────────────────────────────────────────────────

/// Remove every game, session and tag. Ids restart from 1.
pub fn clear_collection(conn: &Connection) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "DELETE FROM game_tags;
         DELETE FROM sessions;
         DELETE FROM games;
         DELETE FROM tags;
         DELETE FROM sqlite_sequence WHERE name IN ('games', 'sessions', 'tags');",
    )?;
    tx.commit()?;
    log::debug!("cleared collection");
    Ok(())
}

/// Load a fixture into the database: tags first, then games with their
/// sessions and tag links.
///
/// `now` anchors the fixture's relative dates. Tags already present are
/// reused; games are always inserted.
pub fn seed_from_fixture(
    conn: &Connection,
    fixture: &SeedFixture,
    now: NaiveDateTime,
) -> Result<SeedStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = SeedStats::default();

    let mut tag_ids = HashMap::new();
    for name in &fixture.tags {
        tag_ids.insert(name.as_str(), insert_tag(&tx, name)?);
        stats.tags += 1;
    }

    for seed in &fixture.games {
        let game_id = insert_game(&tx, &seed.to_game(now))?;
        stats.games += 1;

        for session in &seed.sessions {
            insert_session_row(&tx, &session.to_session(game_id, now))?;
            stats.sessions += 1;
        }
        tx.execute(
            "UPDATE games SET last_played = (SELECT MAX(session_date) FROM sessions WHERE game_id = ?1)
             WHERE id = ?1",
            params![game_id],
        )?;

        for name in &seed.tags {
            let tag_id = *tag_ids
                .get(name.as_str())
                .ok_or_else(|| OperationError::NotFound {
                    entity_type: "tag".to_string(),
                    id: name.clone(),
                })?;
            insert_link(&tx, &GameTag { game_id, tag_id })?;
        }
    }

    tx.commit()?;
    log::debug!(
        "seeded {} tags, {} games, {} sessions",
        stats.tags,
        stats.games,
        stats.sessions
    );
    Ok(stats)
}

/// Statistics from seeding the database.
#[derive(Debug, Default)]
pub struct SeedStats {
    pub tags: usize,
    pub games: usize,
    pub sessions: usize,
}
