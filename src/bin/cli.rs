use clap::{Parser, Subcommand};
use std::sync::Arc;
use user_search_engine::directory::{SqliteDirectory, UserDirectory};
use user_search_engine::{SearchRequest, UserRecord, UserSearchEngine};

#[derive(Parser)]
#[command(name = "user-search-cli")]
#[command(about = "User Search Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path
    #[arg(short, long, default_value = "users.db")]
    db: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the directory
    Search {
        /// Search query
        query: String,

        /// Maximum results
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Minimum fused score
        #[arg(long, default_value = "60.0")]
        min_score: f64,
    },

    /// Import user records from a JSON roster (array of records)
    Import {
        /// Path to the JSON file
        file: String,
    },

    /// Get directory statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let directory = Arc::new(SqliteDirectory::new(&cli.db).await?);

    match cli.command {
        Commands::Search { query, limit, min_score } => {
            println!("🔍 Searching for: {}", query);

            let engine = UserSearchEngine::new(directory.clone());
            let request = SearchRequest {
                query: query.clone(),
                limit,
                min_score,
            };

            let result = engine.suggest(request).await?;

            if result.is_empty() {
                println!("\nNo users above {:.0}% for: {}", min_score, query);
            } else {
                println!(
                    "\n✅ {} matches ({} candidates, {:.2}ms)",
                    result.matches.len(),
                    result.candidates_considered,
                    result.latency_ms
                );
                for (i, m) in result.matches.iter().enumerate() {
                    println!(
                        "   {}. {} - {:.1}% (name {:.1} / email {:.1} / handle {:.1})",
                        i + 1,
                        m.user.display_label(),
                        m.score,
                        m.name_score,
                        m.email_score,
                        m.handle_score
                    );
                }
            }
        }

        Commands::Import { file } => {
            println!("📥 Importing roster from {}", file);

            let data = std::fs::read_to_string(&file)?;
            let users: Vec<UserRecord> = serde_json::from_str(&data)?;

            for user in &users {
                directory.upsert(user).await?;
            }

            println!("✅ Imported {} users", users.len());
        }

        Commands::Stats => {
            let stats = directory.stats().await?;

            println!("📊 Directory Statistics:");
            println!("   Total users: {}", stats.total_users);
            println!("   With email: {}", stats.with_email);
            println!("   With handle: {}", stats.with_handle);

            if let Some(oldest) = stats.oldest_sync {
                println!("   Oldest sync: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
            }

            if let Some(newest) = stats.newest_sync {
                println!("   Newest sync: {}", newest.format("%Y-%m-%d %H:%M:%S"));
            }
        }
    }

    Ok(())
}
