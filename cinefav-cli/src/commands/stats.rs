use cinefav_core::constants::UserId;

use crate::transport::HttpRemote;

/// Show favorites statistics for a user.
pub async fn run_stats(server: &str, user_id: UserId) -> Result<(), Box<dyn std::error::Error>> {
    let remote = HttpRemote::new(server)?;
    let stats = remote.stats(user_id).await?;

    println!("Statistics for {} (user {})", stats.user_name, stats.user_id);
    println!("==============================");
    println!("  Favorites:        {}", stats.total_favorites);
    println!("  Total time:       {} min ({:.1} h)", stats.total_minutes, stats.total_hours);
    println!("  Average duration: {:.0} min", stats.average_minutes);

    if let Some(decade) = &stats.favorite_decade {
        println!("  Favorite decade:  {} ({})", decade.decade, decade.count);
    }
    if let Some(rating) = &stats.most_watched_rating {
        println!("  Top rating:       {} ({})", rating.rating, rating.count);
    }

    if !stats.top_genres.is_empty() {
        println!();
        println!("Top genres:");
        for g in &stats.top_genres {
            println!("  - {} ({})", g.genre, g.count);
        }
    }

    if !stats.top_directors.is_empty() {
        println!();
        println!("Top directors:");
        for d in &stats.top_directors {
            println!("  - {} ({})", d.director, d.count);
        }
    }

    Ok(())
}
