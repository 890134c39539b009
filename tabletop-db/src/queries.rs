//! Read queries for the collection database.
//!
//! Games come back fully resolved (sessions and tags attached) and ordered
//! by id. [`games_by_filters`] evaluates [`FilterCriteria`] in SQL with the
//! same semantics as [`tabletop_catalog::filter_games`].

use std::collections::HashMap;

use rusqlite::types::ToSql;
use rusqlite::{params, Connection};
use tabletop_catalog::{Difficulty, FilterCriteria, Game, GameSession, GameStatus, Genre, Tag};

use crate::operations::OperationError;

const GAME_COLUMNS: &str = "g.id, g.title, g.genre, g.difficulty, g.min_players, g.max_players,
     g.play_time, g.publisher, g.year_published, g.bgg_rating, g.personal_rating,
     g.status, g.date_added, g.last_played";

// ── Game Queries ────────────────────────────────────────────────────────────

/// Every game, ordered by id.
pub fn get_all_games(conn: &Connection) -> Result<Vec<Game>, OperationError> {
    load_games(conn, "", Vec::new())
}

pub fn get_game_by_id(conn: &Connection, id: i64) -> Result<Option<Game>, OperationError> {
    let mut games = load_games(conn, "WHERE g.id = ?", vec![Box::new(id)])?;
    Ok(games.pop())
}

/// Games matching `criteria`, ordered by id.
pub fn games_by_filters(
    conn: &Connection,
    criteria: &FilterCriteria,
) -> Result<Vec<Game>, OperationError> {
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(term) = criteria.normalized_search_term() {
        clauses.push(
            "(instr(fold_case(g.title), ?) > 0
              OR (g.publisher IS NOT NULL AND instr(fold_case(g.publisher), ?) > 0)
              OR EXISTS (SELECT 1 FROM game_tags gt JOIN tags t ON t.id = gt.tag_id
                         WHERE gt.game_id = g.id AND instr(fold_case(t.name), ?) > 0))"
                .to_string(),
        );
        for _ in 0..3 {
            values.push(Box::new(term.clone()));
        }
    }
    if let Some(genre) = criteria.genre {
        clauses.push("g.genre = ?".to_string());
        values.push(Box::new(genre.as_str()));
    }
    if let Some(difficulty) = criteria.difficulty {
        clauses.push("g.difficulty = ?".to_string());
        values.push(Box::new(difficulty.as_str()));
    }
    if let Some(n) = criteria.min_players {
        clauses.push("g.max_players >= ?".to_string());
        values.push(Box::new(n));
    }
    if let Some(n) = criteria.max_players {
        clauses.push("g.min_players <= ?".to_string());
        values.push(Box::new(n));
    }
    if let Some(t) = criteria.min_play_time {
        clauses.push("g.play_time >= ?".to_string());
        values.push(Box::new(t));
    }
    if let Some(t) = criteria.max_play_time {
        clauses.push("g.play_time <= ?".to_string());
        values.push(Box::new(t));
    }
    if let Some(status) = criteria.status {
        clauses.push("g.status = ?".to_string());
        values.push(Box::new(status.as_str()));
    }
    if !criteria.tags.is_empty() {
        let placeholders = vec!["?"; criteria.tags.len()].join(", ");
        clauses.push(format!(
            "EXISTS (SELECT 1 FROM game_tags gt JOIN tags t ON t.id = gt.tag_id
                     WHERE gt.game_id = g.id AND t.name IN ({placeholders}))"
        ));
        for name in &criteria.tags {
            values.push(Box::new(name.clone()));
        }
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    let games = load_games(conn, &where_sql, values)?;
    log::debug!("store filter matched {} games", games.len());
    Ok(games)
}

/// Run the game select with an optional WHERE clause and attach sessions
/// and tags to every returned game.
fn load_games(
    conn: &Connection,
    where_sql: &str,
    values: Vec<Box<dyn ToSql>>,
) -> Result<Vec<Game>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games g {where_sql} ORDER BY g.id");
    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let mut games = stmt
        .query_map(params.as_slice(), row_to_game)?
        .collect::<Result<Vec<_>, _>>()?;

    if games.is_empty() {
        return Ok(games);
    }

    let positions: HashMap<i64, usize> = games
        .iter()
        .enumerate()
        .map(|(i, g)| (g.id, i))
        .collect();

    let mut stmt = conn.prepare(
        "SELECT id, game_id, session_date, players_count, results, session_rating
         FROM sessions ORDER BY game_id, session_date, id",
    )?;
    for session in stmt.query_map([], row_to_session)? {
        let session = session?;
        if let Some(&i) = positions.get(&session.game_id) {
            games[i].sessions.push(session);
        }
    }

    let mut stmt = conn.prepare(
        "SELECT gt.game_id, t.id, t.name
         FROM game_tags gt JOIN tags t ON t.id = gt.tag_id
         ORDER BY gt.game_id, t.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            Tag {
                id: row.get(1)?,
                name: row.get(2)?,
            },
        ))
    })?;
    for row in rows {
        let (game_id, tag) = row?;
        if let Some(&i) = positions.get(&game_id) {
            games[i].tags.push(tag);
        }
    }

    Ok(games)
}

// ── Session Queries ─────────────────────────────────────────────────────────

/// Sessions of one game, oldest first.
pub fn sessions_for_game(
    conn: &Connection,
    game_id: i64,
) -> Result<Vec<GameSession>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, session_date, players_count, results, session_rating
         FROM sessions WHERE game_id = ?1 ORDER BY session_date, id",
    )?;
    let rows = stmt.query_map(params![game_id], row_to_session)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Tag Queries ─────────────────────────────────────────────────────────────

/// All tags, ordered by id.
pub fn list_tags(conn: &Connection) -> Result<Vec<Tag>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name FROM tags ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Every tag with the number of games carrying it, unused tags included.
pub fn tag_usage(conn: &Connection) -> Result<Vec<(Tag, i64)>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, COUNT(gt.game_id)
         FROM tags t LEFT JOIN game_tags gt ON gt.tag_id = t.id
         GROUP BY t.id ORDER BY t.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            },
            row.get(2)?,
        ))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts of the store.
pub fn store_stats(conn: &Connection) -> Result<StoreStats, OperationError> {
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    let sessions: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |r| r.get(0))?;
    let tags: i64 = conn.query_row("SELECT COUNT(*) FROM tags", [], |r| r.get(0))?;
    let tag_links: i64 = conn.query_row("SELECT COUNT(*) FROM game_tags", [], |r| r.get(0))?;

    Ok(StoreStats {
        games,
        sessions,
        tags,
        tag_links,
    })
}

/// Summary statistics for the store.
#[derive(Debug)]
pub struct StoreStats {
    pub games: i64,
    pub sessions: i64,
    pub tags: i64,
    pub tag_links: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    let genre: String = row.get(2)?;
    let difficulty: String = row.get(3)?;
    let status: String = row.get(11)?;
    Ok(Game {
        id: row.get(0)?,
        title: row.get(1)?,
        genre: Genre::from_str_loose(&genre),
        difficulty: Difficulty::from_str_loose(&difficulty),
        min_players: row.get(4)?,
        max_players: row.get(5)?,
        play_time: row.get(6)?,
        publisher: row.get(7)?,
        year_published: row.get(8)?,
        bgg_rating: row.get(9)?,
        personal_rating: row.get(10)?,
        status: GameStatus::from_str_loose(&status),
        date_added: row.get(12)?,
        last_played: row.get(13)?,
        sessions: Vec::new(),
        tags: Vec::new(),
    })
}

fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<GameSession> {
    Ok(GameSession {
        id: row.get(0)?,
        game_id: row.get(1)?,
        session_date: row.get(2)?,
        players_count: row.get(3)?,
        results: row.get(4)?,
        session_rating: row.get(5)?,
    })
}
