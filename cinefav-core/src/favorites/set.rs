use std::collections::BTreeSet;

use crate::constants::MovieId;

/// Movie ids a user has marked as favorite, as known locally.
///
/// Iteration is ascending so listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<MovieId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.ids.contains(&movie_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.ids.iter().copied()
    }

    /// Replace the whole contents with `ids`. Duplicates collapse.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = MovieId>,
    {
        self.ids = ids.into_iter().collect();
    }

    /// Invert membership of `movie_id` and return the new membership.
    pub fn flip(&mut self, movie_id: MovieId) -> bool {
        if self.ids.remove(&movie_id) {
            false
        } else {
            self.ids.insert(movie_id);
            true
        }
    }

    pub fn set_membership(&mut self, movie_id: MovieId, member: bool) {
        if member {
            self.ids.insert(movie_id);
        } else {
            self.ids.remove(&movie_id);
        }
    }
}

impl FromIterator<MovieId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = MovieId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
