//! Favorites state and optimistic-update protocol for the cinefav movie catalog.
//!
//! The controller, its remote contract, and the wire models live here so that
//! the proxy server and every client share the same types.

pub mod error;
pub mod constants;
pub mod models;
pub mod traits;
pub mod favorites;
