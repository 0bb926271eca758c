//! Catalog records exchanged with the upstream API (JSON, upstream field names).

pub mod movie;
pub mod favorite;
pub mod stats;
pub mod serialization;

pub use favorite::{FavoriteCheck, FavoriteRecord};
pub use movie::Movie;
pub use stats::UserStats;
