use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::{validate_tag_name, GameRepository};
use tabletop_db::SqliteRepository;

use crate::CliError;

use super::{open_repository, open_view};

/// Check every tag name before anything is written.
pub(crate) fn validate_tag_names(names: &[String]) -> Result<(), CliError> {
    for name in names {
        validate_tag_name(name.trim()).map_err(|e| CliError::validation(e.to_string()))?;
    }
    Ok(())
}

/// Look up tag ids by name, creating tags that do not exist yet.
pub(crate) fn resolve_tag_ids(
    repo: &SqliteRepository,
    names: &[String],
) -> Result<Vec<i64>, CliError> {
    validate_tag_names(names)?;
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        let id = repo
            .add_tag(name)
            .map_err(|e| CliError::database(format!("Failed to create tag '{}': {}", name, e)))?;
        ids.push(id);
    }
    Ok(ids)
}

pub(crate) fn run_tag_list(db: Option<PathBuf>) -> Result<(), CliError> {
    let repo = open_repository(db)?;
    let usage = tabletop_db::tag_usage(repo.connection())
        .map_err(|e| CliError::database(format!("Failed to list tags: {}", e)))?;

    if usage.is_empty() {
        log::info!("No tags defined.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{:>4}  {:<30}  {:>5}", "ID", "Tag", "Games")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for (tag, games) in &usage {
        let name = format!("{:<30}", tag.name);
        log::info!(
            "{:>4}  {}  {:>5}",
            tag.id,
            name.if_supports_color(Stdout, |t| t.cyan()),
            games,
        );
    }
    Ok(())
}

pub(crate) fn run_tag_add(db: Option<PathBuf>, name: String) -> Result<(), CliError> {
    let repo = open_repository(db)?;
    let name = name.trim().to_string();
    let existing = tabletop_db::find_tag_by_name(repo.connection(), &name)
        .map_err(|e| CliError::database(format!("Failed to look up tag: {}", e)))?;
    if let Some(id) = existing {
        log::info!("Tag '{}' already exists (id {})", name, id);
        return Ok(());
    }

    let ids = resolve_tag_ids(&repo, std::slice::from_ref(&name))?;
    log::info!(
        "Created tag '{}' (id {})",
        name.if_supports_color(Stdout, |t| t.bold()),
        ids[0],
    );
    Ok(())
}

pub(crate) fn run_tag_set(
    db: Option<PathBuf>,
    game_id: i64,
    names: Vec<String>,
) -> Result<(), CliError> {
    let mut view = open_view(db)?;
    let title = view
        .all_games()
        .iter()
        .find(|g| g.id == game_id)
        .map(|g| g.title.clone())
        .ok_or_else(|| CliError::not_found(format!("game {}", game_id)))?;

    let ids = resolve_tag_ids(view.repository(), &names)?;
    view.set_game_tags(game_id, &ids)?;

    if names.is_empty() {
        log::info!("Cleared tags of '{}'", title);
    } else {
        log::info!(
            "Tagged '{}' with: {}",
            title.if_supports_color(Stdout, |t| t.bold()),
            names.join(", "),
        );
    }
    Ok(())
}
