//! Local favorites state and the optimistic toggle protocol that keeps it in
//! step with a [`FavoritesRemote`](crate::traits::remote::FavoritesRemote).

pub mod set;
pub mod pending;
pub mod controller;

pub use controller::{FavoritesController, ToggleOutcome};
pub use pending::{Direction, PendingOperation};
pub use set::FavoriteSet;
