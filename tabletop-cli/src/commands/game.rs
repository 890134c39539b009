use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::{Game, Labelled, SessionSummary};
use tabletop_db::SqliteRepository;
use tabletop_lib::CollectionView;

use crate::cli_types::GameFieldArgs;
use crate::CliError;

use super::tag::{resolve_tag_ids, validate_tag_names};
use super::{format_date, format_players, open_view};

/// Overwrite the attributes that were given on the command line.
fn apply_fields(game: &mut Game, fields: GameFieldArgs) {
    if let Some(genre) = fields.genre {
        game.genre = genre;
    }
    if let Some(difficulty) = fields.difficulty {
        game.difficulty = difficulty;
    }
    if let Some(n) = fields.min_players {
        game.min_players = n;
    }
    if let Some(n) = fields.max_players {
        game.max_players = n;
    }
    if let Some(minutes) = fields.play_time {
        game.play_time = minutes;
    }
    if let Some(publisher) = fields.publisher {
        let publisher = publisher.trim();
        game.publisher = (!publisher.is_empty()).then(|| publisher.to_string());
    }
    if let Some(year) = fields.year {
        game.year_published = year;
    }
    if let Some(rating) = fields.bgg_rating {
        game.bgg_rating = Some(rating);
    }
    if let Some(rating) = fields.rating {
        game.personal_rating = rating;
    }
    if let Some(status) = fields.status {
        game.status = status;
    }
}

fn find_game(games: &[Game], id: i64) -> Result<Game, CliError> {
    games
        .iter()
        .find(|g| g.id == id)
        .cloned()
        .ok_or_else(|| CliError::not_found(format!("game {}", id)))
}

/// Store `game` and attach `tags`. Nothing is written if any tag name is
/// invalid.
fn add_game_with_tags(
    view: &mut CollectionView<SqliteRepository>,
    game: &Game,
    tags: &[String],
) -> Result<i64, CliError> {
    validate_tag_names(tags)?;
    let id = view.add_game(game)?;
    if !tags.is_empty() {
        let ids = resolve_tag_ids(view.repository(), tags)?;
        view.set_game_tags(id, &ids)?;
    }
    Ok(id)
}

pub(crate) fn run_game_add(
    db: Option<PathBuf>,
    title: String,
    fields: GameFieldArgs,
    tags: Vec<String>,
) -> Result<(), CliError> {
    let mut view = open_view(db)?;

    let mut game = Game::new(title.trim(), chrono::Local::now().naive_local());
    apply_fields(&mut game, fields);
    let id = add_game_with_tags(&mut view, &game, &tags)?;

    log::info!(
        "Added '{}' (id {})",
        game.title.if_supports_color(Stdout, |t| t.bold()),
        id,
    );
    Ok(())
}

pub(crate) fn run_game_edit(
    db: Option<PathBuf>,
    id: i64,
    title: Option<String>,
    fields: GameFieldArgs,
) -> Result<(), CliError> {
    let mut view = open_view(db)?;
    let mut game = find_game(view.all_games(), id)?;

    if let Some(title) = title {
        game.title = title.trim().to_string();
    }
    apply_fields(&mut game, fields);
    view.edit_game(&game)?;

    log::info!(
        "Updated '{}' (id {})",
        game.title.if_supports_color(Stdout, |t| t.bold()),
        id,
    );
    Ok(())
}

pub(crate) fn run_game_delete(db: Option<PathBuf>, id: i64, confirm: bool) -> Result<(), CliError> {
    let mut view = open_view(db)?;
    let game = find_game(view.all_games(), id)?;

    if !confirm {
        log::warn!(
            "This will delete '{}' with {} session(s) and its tag links.",
            game.title,
            game.sessions.len(),
        );
        log::warn!("Pass --confirm to proceed.");
        return Ok(());
    }

    view.delete_game(id)?;
    log::info!(
        "Deleted '{}' (id {})",
        game.title.if_supports_color(Stdout, |t| t.bold()),
        id,
    );
    Ok(())
}

pub(crate) fn run_game_show(db: Option<PathBuf>, id: i64) -> Result<(), CliError> {
    let view = open_view(db)?;
    let game = find_game(view.all_games(), id)?;
    let locale = tabletop_lib::settings::load_locale();

    log::info!(
        "{} {}",
        game.title.if_supports_color(Stdout, |t| t.bold()),
        format!("(id {})", game.id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Genre:        {}", game.genre.label(locale));
    log::info!("  Difficulty:   {}", game.difficulty.label(locale));
    log::info!("  Players:      {}", format_players(&game));
    log::info!("  Play time:    {} min", game.play_time);
    log::info!(
        "  Publisher:    {}",
        game.publisher.as_deref().unwrap_or("-")
    );
    log::info!("  Year:         {}", game.year_published);
    match game.bgg_rating {
        Some(r) => log::info!("  BGG rating:   {:.1}", r),
        None => log::info!("  BGG rating:   -"),
    }
    log::info!("  My rating:    {}/10", game.personal_rating);
    log::info!("  Status:       {}", game.status.label(locale));
    log::info!("  Added:        {}", format_date(&game.date_added));
    match &game.last_played {
        Some(dt) => log::info!("  Last played:  {}", format_date(dt)),
        None => log::info!(
            "  Last played:  {}",
            "never".if_supports_color(Stdout, |t| t.yellow())
        ),
    }

    if !game.tags.is_empty() {
        let names: Vec<&str> = game.tags.iter().map(|t| t.name.as_str()).collect();
        log::info!("  Tags:         {}", names.join(", "));
    }

    let summary = SessionSummary::for_game(&game);
    crate::log_blank();
    log::info!("  Sessions:        {:>8}", summary.sessions);
    log::info!("  Avg. rating:     {:>8.1}", summary.average_rating);
    log::info!("  Cost / session:  {:>8.2}", summary.cost_per_session);
    Ok(())
}
