pub(crate) mod config;
pub(crate) mod db;
pub(crate) mod game;
pub(crate) mod list;
pub(crate) mod recommend;
pub(crate) mod session;
pub(crate) mod stats;
pub(crate) mod tag;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::{Game, Labelled, Locale};
use tabletop_db::SqliteRepository;
use tabletop_lib::CollectionView;

use crate::CliError;

/// Open the collection database, creating it if missing.
pub(crate) fn open_repository(db: Option<PathBuf>) -> Result<SqliteRepository, CliError> {
    let path = tabletop_lib::settings::resolve_db_path(db);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    log::debug!("Opening collection database at {}", path.display());
    SqliteRepository::open(&path).map_err(|e| {
        CliError::database(format!(
            "Failed to open collection database {}: {}",
            path.display(),
            e
        ))
    })
}

/// Open the database and load every game into a view.
pub(crate) fn open_view(db: Option<PathBuf>) -> Result<CollectionView<SqliteRepository>, CliError> {
    let repo = open_repository(db)?;
    Ok(CollectionView::load(repo)?)
}

pub(crate) fn log_empty_hint() {
    log::info!("No games in the collection yet.");
    log::info!("Run 'tabletop db seed' to load sample data, or 'tabletop game add' to add one.");
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

pub(crate) fn format_date(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub(crate) fn format_players(game: &Game) -> String {
    if game.min_players == game.max_players {
        game.min_players.to_string()
    } else {
        format!("{}-{}", game.min_players, game.max_players)
    }
}

/// Log games as an aligned table with labels in the given locale.
pub(crate) fn log_game_table(games: &[Game], locale: Locale) {
    log::info!(
        "{}",
        format!(
            "{:>4}  {:<30}  {:<14}  {:>7}  {:>5}  {:>6}  {:<16}",
            "ID", "Title", "Genre", "Players", "Min", "Rating", "Status"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for game in games {
        let title = format!("{:<30}", truncate_str(&game.title, 30));
        log::info!(
            "{:>4}  {}  {:<14}  {:>7}  {:>5}  {:>6}  {:<16}",
            game.id,
            title.if_supports_color(Stdout, |t| t.cyan()),
            game.genre.label(locale),
            format_players(game),
            game.play_time,
            format!("{}/10", game.personal_rating),
            game.status.label(locale),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_str("Каркассон", 20), "Каркассон");
        assert_eq!(truncate_str("Сумеречная борьба", 10), "Сумереч...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }

    #[test]
    fn players_collapse_when_fixed() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut game = Game::new("Дуэль", date);
        game.min_players = 2;
        game.max_players = 2;
        assert_eq!(format_players(&game), "2");
        game.max_players = 4;
        assert_eq!(format_players(&game), "2-4");
    }
}
