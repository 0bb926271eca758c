mod commands;
mod transport;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cinefav_core::constants::{MovieId, UserId};

const DEFAULT_SERVER: &str = "http://localhost:5000";
const DEFAULT_USER: UserId = 1;

#[derive(Parser)]
#[command(name = "cinefav", about = "Browse and manage movie favorites")]
struct Cli {
    /// Proxy base URL. Falls back to CINEFAV_SERVER, then http://localhost:5000.
    #[arg(long, global = true)]
    server: Option<String>,

    /// User id. Falls back to CINEFAV_USER, then 1.
    #[arg(long, global = true)]
    user: Option<UserId>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the user's favorite movies
    Favorites,

    /// Toggle favorites (adds missing ones, removes present ones)
    Toggle {
        /// Movie ids to toggle; all are sent concurrently
        #[arg(required = true)]
        movie_ids: Vec<MovieId>,
    },

    /// Check whether a movie is a favorite
    Check {
        movie_id: MovieId,
    },

    /// Show the user's favorites statistics
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing (controlled by RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }

    let cli = Cli::parse();

    let server = resolve_server(cli.server);
    let user_id = match resolve_user(cli.user) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Favorites => commands::favorites::run_favorites(&server, user_id).await,
        Commands::Toggle { movie_ids } => {
            commands::toggle::run_toggle(&server, user_id, &movie_ids).await
        }
        Commands::Check { movie_id } => commands::check::run_check(&server, user_id, movie_id).await,
        Commands::Stats => commands::stats::run_stats(&server, user_id).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Resolve server address: use provided value, or fall back to the environment.
fn resolve_server(provided: Option<String>) -> String {
    provided
        .or_else(|| std::env::var("CINEFAV_SERVER").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
}

fn resolve_user(provided: Option<UserId>) -> Result<UserId, String> {
    if let Some(id) = provided {
        return Ok(id);
    }
    match std::env::var("CINEFAV_USER") {
        Ok(raw) => raw
            .parse()
            .map_err(|e| format!("invalid CINEFAV_USER {raw:?}: {e}")),
        Err(_) => Ok(DEFAULT_USER),
    }
}
