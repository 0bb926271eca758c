use async_trait::async_trait;

use crate::constants::{MovieId, UserId};
use crate::error::CinefavError;
use crate::models::Movie;

/// Remote store that owns the authoritative favorites of every user.
///
/// Implementations are single-threaded (`?Send`) so the same trait serves
/// native clients and browser builds.
#[async_trait(?Send)]
pub trait FavoritesRemote {
    async fn list(&self, user_id: UserId) -> Result<Vec<Movie>, CinefavError>;
    async fn add(&self, user_id: UserId, movie_id: MovieId) -> Result<(), CinefavError>;
    async fn remove(&self, user_id: UserId, movie_id: MovieId) -> Result<(), CinefavError>;
}

#[async_trait(?Send)]
impl<T: FavoritesRemote + ?Sized> FavoritesRemote for std::rc::Rc<T> {
    async fn list(&self, user_id: UserId) -> Result<Vec<Movie>, CinefavError> {
        (**self).list(user_id).await
    }

    async fn add(&self, user_id: UserId, movie_id: MovieId) -> Result<(), CinefavError> {
        (**self).add(user_id, movie_id).await
    }

    async fn remove(&self, user_id: UserId, movie_id: MovieId) -> Result<(), CinefavError> {
        (**self).remove(user_id, movie_id).await
    }
}
