//! Seams between the favorites controller and whatever reaches the remote store.

pub mod remote;
