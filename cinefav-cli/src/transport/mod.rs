//! Network transports: HTTP client for the cinefav favorites proxy (`reqwest`).

pub mod http;

pub use http::HttpRemote;
