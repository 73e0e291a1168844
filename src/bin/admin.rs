//! CLI administration tool for pocketurl.
//!
//! Inspects short codes and stored URLs without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the short code for an identifier
//! cargo run --bin admin -- encode 125
//!
//! # Show the identifier behind a short code
//! cargo run --bin admin -- decode 00000021
//!
//! # Show the stored record and hit count for a short code
//! cargo run --bin admin -- hits 00000021
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `hits`, `stats` and `db`): PostgreSQL connection string

use pocketurl::domain::codec::{self, MAX_IDENTIFIER, ShortCode};
use pocketurl::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing pocketurl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an identifier into its short code
    Encode {
        /// Identifier (0..=218340105584895)
        id: u64,
    },

    /// Decode a short code into its identifier
    Decode {
        /// 8-character base-62 short code
        code: String,
    },

    /// Show the stored URL and hit count for a short code
    Hits {
        /// 8-character base-62 short code
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { id } => handle_encode(id)?,
        Commands::Decode { code } => handle_decode(&code)?,
        Commands::Hits { code } => handle_hits(&code, &connect().await?).await?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn handle_encode(id: u64) -> Result<()> {
    let code = codec::encode(id).with_context(|| {
        format!(
            "Identifier must be at most {}",
            MAX_IDENTIFIER.to_string().bold()
        )
    })?;

    println!("  {} -> {}", id.to_string().bright_white(), code.cyan().bold());
    Ok(())
}

fn handle_decode(code: &str) -> Result<()> {
    let id = codec::decode(code)?;

    println!("  {} -> {}", code.cyan(), id.to_string().bright_white().bold());
    Ok(())
}

/// Looks up a short code directly in PostgreSQL.
///
/// Reads do not touch the hit counter.
async fn handle_hits(code: &str, pool: &PgPool) -> Result<()> {
    let code = ShortCode::parse(code)?;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let record = repo
        .find(code.identifier())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(record) = record else {
        println!("{}", format!("No URL stored for {}", code).yellow());
        return Ok(());
    };

    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();
    println!("  Code:    {}", code.as_str().cyan());
    println!("  ID:      {}", record.id.to_string().bright_black());
    println!("  URL:     {}", record.long_url.bright_white());
    println!(
        "  Hits:    {}",
        record.hit_count.to_string().bright_green().bold()
    );
    println!(
        "  Created: {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of stored URLs
/// - Total number of store-served redirects
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let hits_total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(hit_count), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  URLs:  {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Hits:  {}",
        hits_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
