use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use tabletop_catalog::{Difficulty, Game, GameSession, GameStatus, Genre};
use tabletop_db::*;

fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(19, 30, 0)
        .unwrap()
}

fn test_game() -> Game {
    let mut game = Game::new("Катан", at(1));
    game.genre = Genre::Strategy;
    game.difficulty = Difficulty::Medium;
    game.min_players = 3;
    game.max_players = 4;
    game.play_time = 90;
    game.publisher = Some("KOSMOS".into());
    game.year_published = 1995;
    game.bgg_rating = Some(8.3);
    game.personal_rating = 9;
    game
}

fn session(game_id: i64, day: u32, rating: u8) -> GameSession {
    GameSession {
        id: 0,
        game_id,
        session_date: at(day),
        players_count: 4,
        results: "Победил Алексей".into(),
        session_rating: rating,
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn insert_and_read_back_game() {
    let conn = open_memory().unwrap();
    let id = insert_game(&conn, &test_game()).unwrap();

    let game = get_game_by_id(&conn, id).unwrap().unwrap();
    let mut expected = test_game();
    expected.id = id;
    assert_eq!(game, expected);
}

#[test]
fn missing_game_is_none() {
    let conn = open_memory().unwrap();
    assert!(get_game_by_id(&conn, 42).unwrap().is_none());
}

#[test]
fn update_game_overwrites_attributes() {
    let conn = open_memory().unwrap();
    let id = insert_game(&conn, &test_game()).unwrap();

    let mut game = get_game_by_id(&conn, id).unwrap().unwrap();
    game.status = GameStatus::ForSale;
    game.publisher = None;
    game.personal_rating = 6;
    game.date_added = at(20);
    assert!(update_game(&conn, &game).unwrap());

    let stored = get_game_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(stored.status, GameStatus::ForSale);
    assert!(stored.publisher.is_none());
    assert_eq!(stored.personal_rating, 6);
    assert_eq!(stored.date_added, at(1));
}

#[test]
fn update_unknown_game_is_noop() {
    let conn = open_memory().unwrap();
    let mut game = test_game();
    game.id = 99;
    assert!(!update_game(&conn, &game).unwrap());
    assert_eq!(count(&conn, "games"), 0);
}

#[test]
fn session_updates_last_played() {
    let conn = open_memory().unwrap();
    let id = insert_game(&conn, &test_game()).unwrap();

    insert_session(&conn, &session(id, 5, 9)).unwrap();
    insert_session(&conn, &session(id, 3, 8)).unwrap();

    let game = get_game_by_id(&conn, id).unwrap().unwrap();
    // The most recently recorded session wins, not the latest date.
    assert_eq!(game.last_played, Some(at(3)));
    assert_eq!(game.sessions.len(), 2);
    assert_eq!(game.sessions[0].session_date, at(3));
    assert_eq!(game.sessions[1].session_rating, 9);
}

#[test]
fn session_for_unknown_game_fails() {
    let conn = open_memory().unwrap();
    let err = insert_session(&conn, &session(7, 5, 9)).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
    assert_eq!(count(&conn, "sessions"), 0);
}

#[test]
fn delete_cascades_to_sessions_and_tags() {
    let conn = open_memory().unwrap();
    let id = insert_game(&conn, &test_game()).unwrap();
    let other = insert_game(&conn, &Game::new("Монополия", at(2))).unwrap();
    let party = insert_tag(&conn, "Вечеринка").unwrap();
    replace_game_tags(&conn, id, &[party]).unwrap();
    replace_game_tags(&conn, other, &[party]).unwrap();
    insert_session(&conn, &session(id, 5, 9)).unwrap();

    assert!(delete_game(&conn, id).unwrap());
    assert_eq!(count(&conn, "sessions"), 0);
    assert_eq!(count(&conn, "game_tags"), 1);
    assert_eq!(count(&conn, "tags"), 1);
    assert!(get_game_by_id(&conn, other).unwrap().is_some());
}

#[test]
fn delete_unknown_game_is_noop() {
    let conn = open_memory().unwrap();
    insert_game(&conn, &test_game()).unwrap();
    assert!(!delete_game(&conn, 500).unwrap());
    assert_eq!(count(&conn, "games"), 1);
}

#[test]
fn insert_tag_reuses_existing_name() {
    let conn = open_memory().unwrap();
    let a = insert_tag(&conn, "Стратегия").unwrap();
    let b = insert_tag(&conn, "Стратегия").unwrap();
    assert_eq!(a, b);
    assert_eq!(find_tag_by_name(&conn, "Стратегия").unwrap(), Some(a));
    assert_eq!(find_tag_by_name(&conn, "стратегия").unwrap(), None);
}

#[test]
fn replace_game_tags_replaces_whole_set() {
    let conn = open_memory().unwrap();
    let id = insert_game(&conn, &test_game()).unwrap();
    let strategy = insert_tag(&conn, "Стратегия").unwrap();
    let party = insert_tag(&conn, "Вечеринка").unwrap();
    let short = insert_tag(&conn, "Короткие").unwrap();

    replace_game_tags(&conn, id, &[strategy, party]).unwrap();
    replace_game_tags(&conn, id, &[short, short]).unwrap();

    let game = get_game_by_id(&conn, id).unwrap().unwrap();
    let names: Vec<_> = game.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Короткие"]);

    replace_game_tags(&conn, id, &[]).unwrap();
    assert!(get_game_by_id(&conn, id).unwrap().unwrap().tags.is_empty());
}

#[test]
fn clear_collection_restarts_ids() {
    let conn = open_memory().unwrap();
    insert_game(&conn, &test_game()).unwrap();
    insert_game(&conn, &test_game()).unwrap();
    insert_tag(&conn, "Стратегия").unwrap();

    clear_collection(&conn).unwrap();
    assert_eq!(count(&conn, "games"), 0);
    assert_eq!(count(&conn, "tags"), 0);
    assert_eq!(insert_game(&conn, &test_game()).unwrap(), 1);
}
