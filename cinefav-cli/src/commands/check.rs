use cinefav_core::constants::{MovieId, UserId};

use crate::transport::HttpRemote;

/// Ask the server whether a movie is one of the user's favorites.
pub async fn run_check(
    server: &str,
    user_id: UserId,
    movie_id: MovieId,
) -> Result<(), Box<dyn std::error::Error>> {
    let remote = HttpRemote::new(server)?;
    let check = remote.check(user_id, movie_id).await?;

    if check.is_favorite {
        match check.marked_at {
            Some(at) => println!("Movie {movie_id} is a favorite of user {user_id} (since {at})"),
            None => println!("Movie {movie_id} is a favorite of user {user_id}"),
        }
    } else {
        println!("Movie {movie_id} is not a favorite of user {user_id}");
    }

    Ok(())
}
