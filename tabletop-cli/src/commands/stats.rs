use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::{FilterCriteria, Labelled, TagIndex};

use crate::CliError;

use super::{log_empty_hint, open_view};

pub(crate) fn run_stats(db: Option<PathBuf>, criteria: FilterCriteria) -> Result<(), CliError> {
    let filtered = !criteria.is_empty();
    let mut view = open_view(db)?;
    if view.all_games().is_empty() {
        log_empty_hint();
        return Ok(());
    }
    view.set_criteria(criteria);

    let locale = tabletop_lib::settings::load_locale();
    let stats = view.stats();

    log::info!(
        "{}",
        if filtered {
            "Collection Statistics (filtered)"
        } else {
            "Collection Statistics"
        }
        .if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!("  Games:          {:>8}", stats.total);
    log::info!("  Never played:   {:>8}", stats.unplayed);

    if !stats.by_status.is_empty() {
        crate::log_blank();
        log::info!("  {}", "By status".if_supports_color(Stdout, |t| t.bold()));
        for (status, count) in &stats.by_status {
            log::info!("    {:<16}{:>8}", status.label(locale), count);
        }
    }

    if !stats.by_genre.is_empty() {
        crate::log_blank();
        log::info!("  {}", "By genre".if_supports_color(Stdout, |t| t.bold()));
        for (genre, count) in &stats.by_genre {
            log::info!("    {:<16}{:>8}", genre.label(locale), count);
        }
    }

    let tags = TagIndex::build(view.games());
    if !tags.is_empty() {
        crate::log_blank();
        log::info!("  {}", "By tag".if_supports_color(Stdout, |t| t.bold()));
        for (name, count) in tags.counts() {
            log::info!("    {:<16}{:>8}", name, count);
        }
    }

    let sessions: usize = view.games().iter().map(|g| g.sessions.len()).sum();
    crate::log_blank();
    log::info!("  Sessions:       {:>8}", sessions);
    if filtered {
        log::info!(
            "  (of {} games in the collection)",
            view.all_games().len()
        );
    }

    Ok(())
}
