//! tabletop CLI
//!
//! Command-line interface for cataloguing a board-game collection.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

pub(crate) use error::CliError;

use cli_types::{
    Cli, Commands, ConfigAction, DbAction, GameAction, SessionAction, TagAction,
};

/// Emit an empty line through the logger so it lands in the logfile too.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db;

    match cli.command {
        Commands::List { filters, json, lang } => {
            commands::list::run_list(db, filters.to_criteria(), json, lang)
        }
        Commands::Stats { filters } => commands::stats::run_stats(db, filters.to_criteria()),
        Commands::Recommend { json } => commands::recommend::run_recommend(db, json),
        Commands::Game { action } => match action {
            GameAction::Add {
                title,
                fields,
                tags,
            } => commands::game::run_game_add(db, title, fields, tags),
            GameAction::Edit { id, title, fields } => {
                commands::game::run_game_edit(db, id, title, fields)
            }
            GameAction::Delete { id, confirm } => commands::game::run_game_delete(db, id, confirm),
            GameAction::Show { id } => commands::game::run_game_show(db, id),
        },
        Commands::Session { action } => match action {
            SessionAction::Add {
                game_id,
                rating,
                players,
                results,
                date,
            } => commands::session::run_session_add(db, game_id, rating, players, results, date),
            SessionAction::History { game_id } => {
                commands::session::run_session_history(db, game_id)
            }
        },
        Commands::Tag { action } => match action {
            TagAction::List => commands::tag::run_tag_list(db),
            TagAction::Add { name } => commands::tag::run_tag_add(db, name),
            TagAction::Set { game_id, names } => commands::tag::run_tag_set(db, game_id, names),
        },
        Commands::Db { action } => match action {
            DbAction::Seed { fixture, force } => commands::db::run_db_seed(db, fixture, force),
            DbAction::Reset {
                confirm,
                empty,
                fixture,
            } => commands::db::run_db_reset(db, confirm, empty, fixture),
            DbAction::Path => commands::db::run_db_path(db),
            DbAction::Stats => commands::db::run_db_stats(db),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(db),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(path),
            ConfigAction::SetLang { locale } => commands::config::run_config_set_lang(locale),
        },
    }
}
