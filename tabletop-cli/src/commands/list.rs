use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::{FilterCriteria, GameRepository, Locale};

use crate::CliError;

use super::{log_empty_hint, log_game_table, open_repository};

/// List games matching `criteria`. The filter runs inside the database.
pub(crate) fn run_list(
    db: Option<PathBuf>,
    criteria: FilterCriteria,
    json: bool,
    lang: Option<Locale>,
) -> Result<(), CliError> {
    let repo = open_repository(db)?;
    let games = repo
        .get_games_by_filters(&criteria)
        .map_err(|e| CliError::database(format!("Failed to query games: {}", e)))?;

    if json {
        let out = serde_json::to_string_pretty(&games)
            .map_err(|e| CliError::other(format!("Failed to serialize games: {}", e)))?;
        println!("{out}");
        return Ok(());
    }

    if games.is_empty() {
        if criteria.is_empty() {
            log_empty_hint();
        } else {
            log::info!("No games match the given filters.");
        }
        return Ok(());
    }

    let locale = lang.unwrap_or_else(tabletop_lib::settings::load_locale);
    log_game_table(&games, locale);
    crate::log_blank();
    log::info!(
        "{} game(s){}",
        games.len().if_supports_color(Stdout, |t| t.bold()),
        if criteria.is_empty() { "" } else { " matched" },
    );
    Ok(())
}
