//! CLI command implementations (favorites, toggle, check, stats).

pub mod favorites;
pub mod toggle;
pub mod check;
pub mod stats;
