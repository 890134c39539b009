//! Tag name → game id index built from loaded games.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Game, Tag};

/// Lookup from tag name to the ids of the games carrying it.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_name: BTreeMap<String, BTreeSet<i64>>,
    tags: BTreeMap<i64, Tag>,
}

impl TagIndex {
    pub fn build(games: &[Game]) -> Self {
        let mut index = Self::default();
        for game in games {
            for tag in &game.tags {
                index
                    .by_name
                    .entry(tag.name.clone())
                    .or_default()
                    .insert(game.id);
                index.tags.entry(tag.id).or_insert_with(|| tag.clone());
            }
        }
        index
    }

    /// Ids of games tagged `name`, ascending.
    pub fn games_with(&self, name: &str) -> Option<&BTreeSet<i64>> {
        self.by_name.get(name)
    }

    /// Distinct tags in use, ordered by id.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// `(tag name, game count)` pairs ordered by name.
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.by_name.iter().map(|(name, ids)| (name.as_str(), ids.len()))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64, tags: &[(i64, &str)]) -> Game {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut g = Game::new("g", date);
        g.id = id;
        g.tags = tags
            .iter()
            .map(|(tid, name)| Tag {
                id: *tid,
                name: name.to_string(),
            })
            .collect();
        g
    }

    #[test]
    fn index_collects_distinct_tags() {
        let games = vec![
            game(1, &[(1, "party"), (2, "short")]),
            game(2, &[(1, "party")]),
            game(3, &[]),
        ];
        let index = TagIndex::build(&games);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.games_with("party").map(|s| s.len()),
            Some(2)
        );
        assert_eq!(index.games_with("kids"), None);
        let counts: Vec<_> = index.counts().collect();
        assert_eq!(counts, vec![("party", 2), ("short", 1)]);
    }
}
