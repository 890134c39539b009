use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::{GameSession, SessionSummary};

use crate::CliError;

use super::{format_date, open_view, truncate_str};

pub(crate) fn run_session_add(
    db: Option<PathBuf>,
    game_id: i64,
    rating: u8,
    players: Option<u32>,
    results: String,
    date: Option<NaiveDate>,
) -> Result<(), CliError> {
    let mut view = open_view(db)?;
    let game = view
        .all_games()
        .iter()
        .find(|g| g.id == game_id)
        .ok_or_else(|| CliError::not_found(format!("game {}", game_id)))?;

    let session = GameSession {
        id: 0,
        game_id,
        session_date: date
            .map(|d| d.and_time(NaiveTime::MIN))
            .unwrap_or_else(|| chrono::Local::now().naive_local()),
        players_count: players.unwrap_or_else(|| game.suggested_players()),
        results: results.trim().to_string(),
        session_rating: rating,
    };
    let title = game.title.clone();

    let id = view.record_session(&session)?;
    log::info!(
        "Recorded session {} for '{}' on {}",
        id,
        title.if_supports_color(Stdout, |t| t.bold()),
        format_date(&session.session_date),
    );
    Ok(())
}

pub(crate) fn run_session_history(db: Option<PathBuf>, game_id: i64) -> Result<(), CliError> {
    let view = open_view(db)?;
    let game = view
        .all_games()
        .iter()
        .find(|g| g.id == game_id)
        .ok_or_else(|| CliError::not_found(format!("game {}", game_id)))?;

    log::info!(
        "{}",
        format!("Sessions of {}", game.title).if_supports_color(Stdout, |t| t.bold()),
    );
    if game.sessions.is_empty() {
        log::info!("  Never played.");
        return Ok(());
    }

    crate::log_blank();
    log::info!(
        "  {:<10}  {:>7}  {:>6}  {}",
        "Date", "Players", "Rating", "Results"
    );
    for session in &game.sessions {
        log::info!(
            "  {:<10}  {:>7}  {:>6}  {}",
            format_date(&session.session_date),
            session.players_count,
            format!("{}/10", session.session_rating),
            truncate_str(&session.results, 50),
        );
    }

    let summary = SessionSummary::for_game(game);
    crate::log_blank();
    log::info!("  Sessions:        {:>8}", summary.sessions);
    log::info!("  Avg. rating:     {:>8.1}", summary.average_rating);
    log::info!("  Cost / session:  {:>8.2}", summary.cost_per_session);
    Ok(())
}
