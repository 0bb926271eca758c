use serde::{Deserialize, Serialize};

use crate::constants::{MovieId, UserId};

/// Favorite association returned by the upstream when one is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteRecord {
    pub id: i64,
    #[serde(rename = "id_usuario")]
    pub user_id: UserId,
    #[serde(rename = "id_pelicula")]
    pub movie_id: MovieId,
    #[serde(rename = "fecha_marcado", default)]
    pub marked_at: String,
}

/// Answer of the verify endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteCheck {
    #[serde(rename = "es_favorito")]
    pub is_favorite: bool,
    #[serde(rename = "favorito_id", default, skip_serializing_if = "Option::is_none")]
    pub favorite_id: Option<i64>,
    #[serde(rename = "fecha_marcado", default, skip_serializing_if = "Option::is_none")]
    pub marked_at: Option<String>,
}
