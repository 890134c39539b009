use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::{load_fixture, load_fixture_dir, parse_fixture, SeedFixture};
use tabletop_db::SqliteRepository;

use crate::CliError;

use super::open_repository;

/// Sample collection compiled into the binary.
const BUNDLED_FIXTURE: &str = include_str!("../../../fixtures/seed.yaml");

fn load_seed(fixture: Option<&Path>) -> Result<SeedFixture, CliError> {
    let loaded = match fixture {
        Some(path) if path.is_dir() => load_fixture_dir(path),
        Some(path) => load_fixture(path),
        None => parse_fixture(BUNDLED_FIXTURE, "bundled seed.yaml"),
    };
    loaded.map_err(|e| CliError::fixture(e.to_string()))
}

fn seed(repo: &SqliteRepository, fixture: Option<&Path>) -> Result<(), CliError> {
    let fixture = load_seed(fixture)?;
    let stats = tabletop_db::seed_from_fixture(
        repo.connection(),
        &fixture,
        chrono::Local::now().naive_local(),
    )
    .map_err(|e| CliError::database(format!("Failed to seed database: {}", e)))?;

    log::info!(
        "{}",
        "Sample data loaded.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Tags:     {:>8}", stats.tags);
    log::info!("  Games:    {:>8}", stats.games);
    log::info!("  Sessions: {:>8}", stats.sessions);
    Ok(())
}

pub(crate) fn run_db_seed(
    db: Option<PathBuf>,
    fixture: Option<PathBuf>,
    force: bool,
) -> Result<(), CliError> {
    let repo = open_repository(db)?;
    let counts = tabletop_db::store_stats(repo.connection())
        .map_err(|e| CliError::database(format!("Failed to query database: {}", e)))?;

    if counts.games > 0 && !force {
        log::warn!("The database already holds {} games.", counts.games);
        log::info!("Re-run with --force to add the sample games anyway, or use:");
        log::info!("  tabletop db reset --confirm");
        return Ok(());
    }

    seed(&repo, fixture.as_deref())
}

/// Delete every game, session and tag, then reseed unless `empty` is set.
pub(crate) fn run_db_reset(
    db: Option<PathBuf>,
    confirm: bool,
    empty: bool,
    fixture: Option<PathBuf>,
) -> Result<(), CliError> {
    let path = tabletop_lib::settings::resolve_db_path(db.clone());

    if !confirm {
        log::warn!(
            "This will permanently delete all games, sessions and tags in:\n  {}",
            path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  tabletop db reset --confirm");
        return Ok(());
    }

    // Fixture errors must surface before anything is cleared.
    if !empty {
        load_seed(fixture.as_deref())?;
    }

    let repo = open_repository(db)?;
    tabletop_db::clear_collection(repo.connection())
        .map_err(|e| CliError::database(format!("Failed to clear database: {}", e)))?;
    log::info!(
        "{}",
        "Collection cleared.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", path.display());

    if empty {
        return Ok(());
    }
    crate::log_blank();
    seed(&repo, fixture.as_deref())
}

pub(crate) fn run_db_path(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = tabletop_lib::settings::resolve_db_path(db);
    let status = if path.exists() { "(exists)" } else { "(not created yet)" };
    log::info!(
        "{} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

pub(crate) fn run_db_stats(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = tabletop_lib::settings::resolve_db_path(db.clone());
    let repo = open_repository(db)?;
    let stats = tabletop_db::store_stats(repo.connection())
        .map_err(|e| CliError::database(format!("Failed to query database stats: {}", e)))?;

    log::info!(
        "{}",
        "Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", path.display());
    crate::log_blank();
    log::info!("  Games:          {:>8}", stats.games);
    log::info!("  Sessions:       {:>8}", stats.sessions);
    log::info!("  Tags:           {:>8}", stats.tags);
    log::info!("  Tag links:      {:>8}", stats.tag_links);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_parses() {
        let fixture = load_seed(None).unwrap();
        assert_eq!(fixture.games.len(), 15);
        assert_eq!(fixture.tags.len(), 9);
    }

    #[test]
    fn reset_then_seed_restores_counts() {
        let repo = SqliteRepository::open_memory().unwrap();
        seed(&repo, None).unwrap();
        tabletop_db::clear_collection(repo.connection()).unwrap();
        seed(&repo, None).unwrap();

        let stats = tabletop_db::store_stats(repo.connection()).unwrap();
        assert_eq!(stats.games, 15);
        assert_eq!(stats.sessions, 9);
        assert_eq!(stats.tag_links, 30);
    }

    #[test]
    fn missing_fixture_is_error() {
        let err = load_seed(Some(Path::new("/nonexistent/seed.yaml"))).unwrap_err();
        assert!(matches!(err, CliError::Fixture(_)));
    }
}
