use serde::{Deserialize, Serialize};

use crate::constants::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreCount {
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectorCount {
    pub director: String,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecadeCount {
    #[serde(rename = "decada")]
    pub decade: String,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingCount {
    #[serde(rename = "clasificacion")]
    pub rating: String,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

/// Aggregate statistics over a user's favorites, computed upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
    #[serde(rename = "nombre_usuario")]
    pub user_name: String,
    #[serde(rename = "total_favoritos")]
    pub total_favorites: u32,
    #[serde(rename = "duracion_total_minutos")]
    pub total_minutes: u64,
    #[serde(rename = "duracion_total_horas")]
    pub total_hours: f64,
    #[serde(rename = "generos_favoritos", default)]
    pub top_genres: Vec<GenreCount>,
    #[serde(rename = "directores_favoritos", default)]
    pub top_directors: Vec<DirectorCount>,
    #[serde(rename = "decada_favorita", default)]
    pub favorite_decade: Option<DecadeCount>,
    #[serde(rename = "clasificacion_mas_vista", default)]
    pub most_watched_rating: Option<RatingCount>,
    #[serde(rename = "promedio_duracion")]
    pub average_minutes: f64,
}
