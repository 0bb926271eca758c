use serde::{Deserialize, Serialize};

use crate::constants::MovieId;

/// A catalog movie as returned by the favorites list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(rename = "titulo")]
    pub title: String,
    pub director: String,
    #[serde(rename = "genero")]
    pub genre: String,
    /// Running time in minutes.
    #[serde(rename = "duracion")]
    pub duration: u32,
    #[serde(rename = "año")]
    pub year: i32,
    #[serde(rename = "clasificacion")]
    pub rating: String,
    #[serde(rename = "sinopsis", default)]
    pub synopsis: String,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Collect the identifiers of a movie list, preserving order.
pub fn movie_ids(movies: &[Movie]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}
