use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletop_catalog::Locale;
use tabletop_lib::settings;

use crate::CliError;

/// Show the settings file and the values in effect.
pub(crate) fn run_config_show(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = if db.is_some() {
        "--db"
    } else if settings::SettingsFile::default_location().db_path().is_some() {
        "settings"
    } else {
        "default"
    };
    let db_path = settings::resolve_db_path(db);
    log::info!(
        "  Database:      {} {}",
        db_path.display(),
        format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Language:      {}", settings::load_locale().code());

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

pub(crate) fn run_config_set_db(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = match path {
        Some(p) if p.is_relative() => Some(std::env::current_dir()?.join(p)),
        other => other,
    };
    settings::save_db_path(path.as_deref())
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;

    match &path {
        Some(p) => log::info!(
            "Database path set to {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "Database path cleared, using {}",
            settings::default_db_path().display(),
        ),
    }
    Ok(())
}

pub(crate) fn run_config_set_lang(locale: Locale) -> Result<(), CliError> {
    settings::save_locale(locale)
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!("Language set to {}", locale.code());
    Ok(())
}
