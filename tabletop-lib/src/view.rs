//! Presentation state over a [`GameRepository`].
//!
//! [`CollectionView`] keeps the full game list, the current
//! [`FilterCriteria`], and the visible subset with its statistics. Every
//! criteria setter re-runs the filter immediately; there is no deferred or
//! implicit re-filtering. Mutations go to the repository and are followed by a
//! full [`refresh`](CollectionView::refresh).

use tabletop_catalog::{
    filter_games, recommended_games, validate_game, validate_session, CollectionStats,
    Difficulty, FilterCriteria, Game, GameRepository, GameSession, GameStatus, Genre, Tag,
    TagIndex, ValidationErrors,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("{action}: {source}")]
    Repository {
        action: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),
}

pub struct CollectionView<R: GameRepository> {
    repo: R,
    all_games: Vec<Game>,
    visible: Vec<Game>,
    stats: CollectionStats,
    criteria: FilterCriteria,
    tag_index: TagIndex,
    showing_recommendations: bool,
    last_error: Option<String>,
}

impl<R: GameRepository> CollectionView<R> {
    /// An empty view. Call [`refresh`](Self::refresh) to load the collection.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            all_games: Vec::new(),
            visible: Vec::new(),
            stats: CollectionStats::default(),
            criteria: FilterCriteria::default(),
            tag_index: TagIndex::default(),
            showing_recommendations: false,
            last_error: None,
        }
    }

    /// Create a view and load the collection.
    pub fn load(repo: R) -> Result<Self, ViewError> {
        let mut view = Self::new(repo);
        view.refresh()?;
        Ok(view)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The visible games: the filtered list, or recommendations.
    pub fn games(&self) -> &[Game] {
        &self.visible
    }

    /// Every loaded game, unfiltered.
    pub fn all_games(&self) -> &[Game] {
        &self.all_games
    }

    /// Statistics of the visible games.
    pub fn stats(&self) -> &CollectionStats {
        &self.stats
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Distinct tags carried by loaded games, ordered by id.
    pub fn available_tags(&self) -> Vec<&Tag> {
        self.tag_index.tags().collect()
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    pub fn is_showing_recommendations(&self) -> bool {
        self.showing_recommendations
    }

    /// User-visible message for the last failed operation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Loading and filtering ───────────────────────────────────────────

    /// Reload every game from the repository and reapply the criteria.
    ///
    /// On failure the previously loaded games stay in place.
    pub fn refresh(&mut self) -> Result<(), ViewError> {
        let games = match self.repo.get_all_games() {
            Ok(games) => games,
            Err(e) => return Err(self.fail("Error loading the collection", e)),
        };
        log::debug!("loaded {} games", games.len());
        self.tag_index = TagIndex::build(&games);
        self.all_games = games;
        self.last_error = None;
        self.apply_filters();
        Ok(())
    }

    fn apply_filters(&mut self) {
        let matched = filter_games(&self.all_games, &self.criteria);
        self.stats = CollectionStats::compute_refs(&matched);
        self.visible = matched.into_iter().cloned().collect();
        self.showing_recommendations = false;
    }

    /// Replace every criterion at once and re-filter.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.apply_filters();
    }

    pub fn set_search_term(&mut self, term: Option<String>) {
        self.criteria.search_term = term;
        self.apply_filters();
    }

    pub fn set_genre(&mut self, genre: Option<Genre>) {
        self.criteria.genre = genre;
        self.apply_filters();
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.criteria.difficulty = difficulty;
        self.apply_filters();
    }

    pub fn set_min_players(&mut self, n: Option<u32>) {
        self.criteria.min_players = n;
        self.apply_filters();
    }

    pub fn set_max_players(&mut self, n: Option<u32>) {
        self.criteria.max_players = n;
        self.apply_filters();
    }

    pub fn set_min_play_time(&mut self, minutes: Option<u32>) {
        self.criteria.min_play_time = minutes;
        self.apply_filters();
    }

    pub fn set_max_play_time(&mut self, minutes: Option<u32>) {
        self.criteria.max_play_time = minutes;
        self.apply_filters();
    }

    pub fn set_status(&mut self, status: Option<GameStatus>) {
        self.criteria.status = status;
        self.apply_filters();
    }

    pub fn set_tags<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.tags = names.into_iter().map(Into::into).collect();
        self.apply_filters();
    }

    /// Clear every criterion and re-filter.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.apply_filters();
    }

    /// Show recommendations computed over the whole collection.
    ///
    /// Returns `false` and keeps the current list when there is nothing to
    /// recommend.
    pub fn show_recommendations(&mut self) -> bool {
        let picks = recommended_games(&self.all_games);
        if picks.is_empty() {
            self.last_error = Some("No recommendations to show".to_string());
            return false;
        }
        self.stats = CollectionStats::compute_refs(&picks);
        self.visible = picks.into_iter().cloned().collect();
        self.showing_recommendations = true;
        true
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Validate and store a new game, then refresh. Returns its id.
    pub fn add_game(&mut self, game: &Game) -> Result<i64, ViewError> {
        validate_game(game)?;
        let id = match self.repo.add_game(game) {
            Ok(id) => id,
            Err(e) => return Err(self.fail("Error adding the game", e)),
        };
        log::debug!("added '{}' (id {id})", game.title);
        self.refresh()?;
        Ok(id)
    }

    /// Validate and store changes to an existing game, then refresh.
    pub fn edit_game(&mut self, game: &Game) -> Result<(), ViewError> {
        validate_game(game)?;
        if let Err(e) = self.repo.update_game(game) {
            return Err(self.fail("Error updating the game", e));
        }
        self.refresh()
    }

    pub fn delete_game(&mut self, id: i64) -> Result<(), ViewError> {
        if let Err(e) = self.repo.delete_game(id) {
            return Err(self.fail("Error deleting the game", e));
        }
        self.refresh()
    }

    /// Validate and record a play session, then refresh. Returns its id.
    pub fn record_session(&mut self, session: &GameSession) -> Result<i64, ViewError> {
        validate_session(session)?;
        let id = match self.repo.add_game_session(session) {
            Ok(id) => id,
            Err(e) => return Err(self.fail("Error recording the session", e)),
        };
        self.refresh()?;
        Ok(id)
    }

    /// Replace the tag set of a game, then refresh.
    pub fn set_game_tags(&mut self, game_id: i64, tag_ids: &[i64]) -> Result<(), ViewError> {
        if let Err(e) = self.repo.update_game_tags(game_id, tag_ids) {
            return Err(self.fail("Error updating tags", e));
        }
        self.refresh()
    }

    fn fail(&mut self, action: &'static str, err: R::Error) -> ViewError {
        log::error!("{action}: {err}");
        self.last_error = Some(format!("{action}: {err}"));
        ViewError::Repository {
            action,
            source: Box::new(err),
        }
    }
}
