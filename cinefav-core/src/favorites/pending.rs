use std::fmt;

use crate::constants::MovieId;
use crate::favorites::set::FavoriteSet;

/// Which remote call a toggle dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Add,
    Remove,
}

impl Direction {
    /// A toggle removes what was a favorite and adds what was not.
    pub fn for_membership(was_favorite: bool) -> Self {
        if was_favorite {
            Direction::Remove
        } else {
            Direction::Add
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Add => f.write_str("add"),
            Direction::Remove => f.write_str("remove"),
        }
    }
}

/// An optimistic toggle whose remote call has not settled yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    pub movie_id: MovieId,
    pub direction: Direction,
    /// The whole set as it was before the optimistic change.
    pub snapshot: FavoriteSet,
}

impl PendingOperation {
    pub fn new(movie_id: MovieId, snapshot: FavoriteSet) -> Self {
        let direction = Direction::for_membership(snapshot.contains(movie_id));
        Self {
            movie_id,
            direction,
            snapshot,
        }
    }

    /// Undo this operation on `set`.
    ///
    /// Only the toggled id goes back to its snapshot membership; ids touched
    /// by other in-flight toggles or by a later sync are left alone.
    pub fn rollback(&self, set: &mut FavoriteSet) {
        set.set_membership(self.movie_id, self.snapshot.contains(self.movie_id));
    }
}
