use tracing::info;

use cinefav_core::constants::UserId;
use cinefav_core::models::Movie;
use cinefav_core::traits::remote::FavoritesRemote;

use crate::transport::HttpRemote;

/// List the user's favorite movies.
pub async fn run_favorites(server: &str, user_id: UserId) -> Result<(), Box<dyn std::error::Error>> {
    let remote = HttpRemote::new(server)?;
    let movies = remote.list(user_id).await?;

    info!(user_id, count = movies.len(), "favorites fetched");

    if movies.is_empty() {
        println!("User {user_id} has no favorites yet.");
        return Ok(());
    }

    println!("Favorites of user {user_id} ({}):", movies.len());
    for movie in &movies {
        println!("  {}", format_movie(movie));
    }

    Ok(())
}

pub(crate) fn format_movie(movie: &Movie) -> String {
    format!(
        "[{:>5}] {} ({}) - {}, {} min, {}",
        movie.id, movie.title, movie.year, movie.director, movie.duration, movie.genre
    )
}
