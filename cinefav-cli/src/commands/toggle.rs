use futures::future::join_all;
use tracing::info;

use cinefav_core::constants::{MovieId, UserId};
use cinefav_core::favorites::FavoritesController;

use crate::transport::HttpRemote;

/// Toggle one or more favorites through the optimistic controller.
///
/// All toggles are dispatched at once; each one confirms or rolls back on its own.
pub async fn run_toggle(
    server: &str,
    user_id: UserId,
    movie_ids: &[MovieId],
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = FavoritesController::new(user_id, HttpRemote::new(server)?);
    controller.load().await?;

    let toggles: Vec<_> = movie_ids.iter().map(|&id| controller.toggle(id)).collect();
    info!(user_id = controller.user_id(), in_flight = toggles.len(), "toggles dispatched");

    let results = join_all(toggles).await;

    let mut failed = 0usize;
    for (movie_id, result) in movie_ids.iter().zip(results) {
        match result {
            Ok(outcome) => {
                let state = if outcome.is_favorite { "favorite" } else { "not favorite" };
                println!("  {movie_id}: {} confirmed, now {state}", outcome.direction);
            }
            Err(e) => {
                failed += 1;
                println!("  {movie_id}: rolled back ({e})");
            }
        }
    }

    let ids: Vec<String> = controller.favorites().iter().map(|id| id.to_string()).collect();
    println!();
    println!("Favorites now: [{}]", ids.join(", "));

    if failed > 0 {
        return Err(format!("{failed} of {} toggles failed", movie_ids.len()).into());
    }
    Ok(())
}
