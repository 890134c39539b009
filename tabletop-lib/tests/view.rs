use std::cell::Cell;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tabletop_catalog::{
    load_fixture, FilterCriteria, Game, GameRepository, GameSession, GameStatus, Genre, Tag,
};
use tabletop_db::{seed_from_fixture, OperationError, SqliteRepository};
use tabletop_lib::{CollectionView, ViewError};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// SQLite store that can be switched into a failing state.
struct FlakyRepo {
    inner: SqliteRepository,
    down: Cell<bool>,
}

impl FlakyRepo {
    fn seeded() -> Self {
        let inner = SqliteRepository::open_memory().unwrap();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures/seed.yaml");
        let fixture = load_fixture(&path).unwrap();
        seed_from_fixture(inner.connection(), &fixture, now()).unwrap();
        Self {
            inner,
            down: Cell::new(false),
        }
    }

    fn check(&self) -> Result<(), OperationError> {
        if self.down.get() {
            Err(OperationError::NotFound {
                entity_type: "store".to_string(),
                id: "collection.db".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl GameRepository for FlakyRepo {
    type Error = OperationError;

    fn get_all_games(&self) -> Result<Vec<Game>, OperationError> {
        self.check()?;
        self.inner.get_all_games()
    }

    fn get_game_by_id(&self, id: i64) -> Result<Option<Game>, OperationError> {
        self.check()?;
        self.inner.get_game_by_id(id)
    }

    fn add_game(&self, game: &Game) -> Result<i64, OperationError> {
        self.check()?;
        self.inner.add_game(game)
    }

    fn update_game(&self, game: &Game) -> Result<(), OperationError> {
        self.check()?;
        self.inner.update_game(game)
    }

    fn delete_game(&self, id: i64) -> Result<(), OperationError> {
        self.check()?;
        self.inner.delete_game(id)
    }

    fn add_game_session(&self, session: &GameSession) -> Result<i64, OperationError> {
        self.check()?;
        self.inner.add_game_session(session)
    }

    fn update_game_tags(&self, game_id: i64, tag_ids: &[i64]) -> Result<(), OperationError> {
        self.check()?;
        self.inner.update_game_tags(game_id, tag_ids)
    }

    fn get_games_by_filters(&self, criteria: &FilterCriteria) -> Result<Vec<Game>, OperationError> {
        self.check()?;
        self.inner.get_games_by_filters(criteria)
    }

    fn list_tags(&self) -> Result<Vec<Tag>, OperationError> {
        self.check()?;
        self.inner.list_tags()
    }

    fn add_tag(&self, name: &str) -> Result<i64, OperationError> {
        self.check()?;
        self.inner.add_tag(name)
    }
}

fn view() -> CollectionView<FlakyRepo> {
    CollectionView::load(FlakyRepo::seeded()).unwrap()
}

fn titles(view: &CollectionView<FlakyRepo>) -> Vec<&str> {
    view.games().iter().map(|g| g.title.as_str()).collect()
}

#[test]
fn load_shows_everything() {
    let view = view();
    assert_eq!(view.games().len(), 15);
    assert_eq!(view.stats().total, 15);
    assert_eq!(view.stats().unplayed, 7);
    // "Для детей" is declared but carried by no game.
    assert_eq!(view.available_tags().len(), 8);
    assert!(view.last_error().is_none());
}

#[test]
fn setters_refilter_immediately() {
    let mut view = view();

    view.set_genre(Some(Genre::Strategy));
    assert_eq!(view.games().len(), 5);
    assert_eq!(view.stats().total, 5);

    view.set_min_players(Some(5));
    assert_eq!(titles(&view), vec!["Каркассон", "7 чудес", "Дикари"]);
    assert_eq!(view.stats().by_status[&GameStatus::WantToBuy], 2);
    assert_eq!(view.stats().unplayed, 2);

    view.set_genre(None);
    view.set_min_players(None);
    view.set_search_term(Some("  КА ".to_string()));
    assert!(view.games().iter().any(|g| g.title == "Катан"));
    assert_eq!(view.stats().total, view.games().len());
}

#[test]
fn tag_setter_uses_any_of() {
    let mut view = view();
    view.set_tags(["Кооперативная", "Карточная"]);
    assert_eq!(
        titles(&view),
        vec!["Клаустрафобия", "Тайм стори", "Свинтус", "Манчкин"]
    );
    view.set_tags(Vec::<String>::new());
    assert_eq!(view.games().len(), 15);
}

#[test]
fn reset_restores_full_list() {
    let mut view = view();
    view.set_status(Some(GameStatus::ForSale));
    view.set_max_play_time(Some(10));
    assert!(view.games().is_empty());
    assert_eq!(view.stats().total, 0);

    view.reset_filters();
    assert!(view.criteria().is_empty());
    assert_eq!(view.games().len(), 15);
}

#[test]
fn recommendations_replace_visible_list() {
    let mut view = view();
    assert!(view.show_recommendations());
    assert!(view.is_showing_recommendations());
    assert_eq!(view.games().len(), 5);
    assert_eq!(view.stats().total, 5);
    assert!(view.games().iter().all(|g| g.personal_rating >= 7));

    view.set_difficulty(None);
    assert!(!view.is_showing_recommendations());
    assert_eq!(view.games().len(), 15);
}

#[test]
fn add_game_refreshes_with_criteria_kept() {
    let mut view = view();
    view.set_genre(Some(Genre::Family));
    let before = view.games().len();

    let mut game = Game::new("Азул", now());
    game.genre = Genre::Family;
    game.min_players = 2;
    let id = view.add_game(&game).unwrap();

    assert_eq!(view.all_games().len(), 16);
    assert_eq!(view.games().len(), before + 1);
    assert!(view.games().iter().any(|g| g.id == id));
}

#[test]
fn invalid_game_never_reaches_repository() {
    let mut view = view();
    let mut game = Game::new("", now());
    game.personal_rating = 0;

    match view.add_game(&game) {
        Err(ViewError::Validation(errors)) => assert_eq!(errors.iter().count(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(view.all_games().len(), 15);
}

#[test]
fn record_session_marks_game_played() {
    let mut view = view();
    let carcassonne = view
        .all_games()
        .iter()
        .find(|g| g.title == "Каркассон")
        .unwrap()
        .clone();
    assert!(carcassonne.is_unplayed());

    let session = GameSession {
        id: 0,
        game_id: carcassonne.id,
        session_date: now(),
        players_count: carcassonne.suggested_players(),
        results: String::new(),
        session_rating: 8,
    };
    view.record_session(&session).unwrap();

    let updated = view
        .all_games()
        .iter()
        .find(|g| g.id == carcassonne.id)
        .unwrap();
    assert_eq!(updated.sessions.len(), 1);
    assert_eq!(updated.last_played, Some(now()));
    assert_eq!(view.stats().unplayed, 6);
}

#[test]
fn edit_and_delete_refresh() {
    let mut view = view();
    let mut game = view.all_games()[1].clone();
    game.status = GameStatus::ForSale;
    view.edit_game(&game).unwrap();
    assert_eq!(view.stats().by_status[&GameStatus::ForSale], 2);

    view.delete_game(game.id).unwrap();
    assert_eq!(view.all_games().len(), 14);
    assert!(view.all_games().iter().all(|g| g.id != game.id));
}

#[test]
fn set_game_tags_updates_available_tags() {
    let mut view = view();
    let tag = view.repository().add_tag("Абстрактная").unwrap();
    assert_eq!(view.available_tags().len(), 8);

    let id = view.all_games()[0].id;
    view.set_game_tags(id, &[tag]).unwrap();
    assert_eq!(view.all_games()[0].tags.len(), 1);
    assert_eq!(view.available_tags().len(), 9);
    assert!(view.available_tags().iter().any(|t| t.name == "Абстрактная"));
    assert_eq!(view.tag_index().games_with("Абстрактная").unwrap().len(), 1);
}

#[test]
fn repository_failure_keeps_previous_list() {
    let mut view = view();
    view.set_genre(Some(Genre::Card));
    let before: Vec<i64> = view.games().iter().map(|g| g.id).collect();

    view.repository().down.set(true);
    assert!(view.refresh().is_err());
    assert!(view.delete_game(before[0]).is_err());

    let message = view.last_error().unwrap();
    assert!(message.starts_with("Error deleting the game"));
    assert_eq!(view.games().iter().map(|g| g.id).collect::<Vec<_>>(), before);
    assert_eq!(view.all_games().len(), 15);

    view.repository().down.set(false);
    view.refresh().unwrap();
    assert!(view.last_error().is_none());
}
