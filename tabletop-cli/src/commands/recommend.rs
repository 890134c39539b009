use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::Labelled;
use tabletop_catalog::recommend::seed_genres;

use crate::CliError;

use super::{log_game_table, open_view};

pub(crate) fn run_recommend(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let mut view = open_view(db)?;

    if !view.show_recommendations() {
        if json {
            println!("[]");
        } else {
            log::info!("Nothing to recommend yet.");
        }
        return Ok(());
    }

    if json {
        let out = serde_json::to_string_pretty(view.games())
            .map_err(|e| CliError::other(format!("Failed to serialize games: {}", e)))?;
        println!("{out}");
        return Ok(());
    }

    let locale = tabletop_lib::settings::load_locale();
    let genres = seed_genres(view.all_games());
    log::info!(
        "{}",
        "Recommended Games".if_supports_color(Stdout, |t| t.bold()),
    );
    if genres.is_empty() {
        log::info!("  No game rated 8 or higher yet, showing games you have never played.");
    } else {
        let names: Vec<&str> = genres.iter().map(|g| g.label(locale)).collect();
        log::info!("  Based on your favourite genres: {}", names.join(", "));
    }
    crate::log_blank();
    log_game_table(view.games(), locale);
    Ok(())
}
