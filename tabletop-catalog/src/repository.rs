//! The persistence contract consumed by the view layer and frontends.

use crate::filter::FilterCriteria;
use crate::types::{Game, GameSession, Tag};

/// CRUD access to games, sessions and tags.
///
/// Implementors return games with their sessions and tags already attached,
/// ordered by id. Updates and deletes of unknown ids are no-ops.
pub trait GameRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every game, sessions and tags resolved.
    fn get_all_games(&self) -> Result<Vec<Game>, Self::Error>;

    fn get_game_by_id(&self, id: i64) -> Result<Option<Game>, Self::Error>;

    /// Persist a new game and return its assigned id. `game.id` is ignored.
    fn add_game(&self, game: &Game) -> Result<i64, Self::Error>;

    /// Overwrite the scalar attributes of an existing game.
    fn update_game(&self, game: &Game) -> Result<(), Self::Error>;

    /// Remove a game together with its sessions and tag links.
    fn delete_game(&self, id: i64) -> Result<(), Self::Error>;

    /// Record a session and move the owning game's `last_played` to its date.
    fn add_game_session(&self, session: &GameSession) -> Result<i64, Self::Error>;

    /// Replace the full tag set of a game.
    fn update_game_tags(&self, game_id: i64, tag_ids: &[i64]) -> Result<(), Self::Error>;

    /// Run the filter inside the store. Must agree with
    /// [`filter_games`](crate::filter::filter_games) on the same data.
    fn get_games_by_filters(&self, criteria: &FilterCriteria) -> Result<Vec<Game>, Self::Error>;

    fn list_tags(&self) -> Result<Vec<Tag>, Self::Error>;

    /// Create a tag, or return the id of the existing tag with that name.
    fn add_tag(&self, name: &str) -> Result<i64, Self::Error>;
}
