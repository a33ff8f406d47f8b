//! CLI administration tool for url-alias.
//!
//! Inspects and manipulates aliases directly against the database, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Alias counts and server version
//! cargo run --bin admin -- db info
//!
//! # Create (or fetch) the alias of a URL
//! cargo run --bin admin -- alias create https://example.com/a
//!
//! # Resolve a code the way the redirect endpoint does
//! cargo run --bin admin -- alias resolve 1714564800aZ3k
//!
//! # Show the stored row for a code, expired or not
//! cargo run --bin admin -- alias show 1714564800aZ3k
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`), read
//! from the environment or a `.env` file.

use url_alias::application::services::Resolution;
use url_alias::config::{Config, mask_connection_string};
use url_alias::domain::clock::{Clock, SystemClock};
use url_alias::infrastructure::persistence::PgAliasRepository;
use url_alias::server::{build_alias_service, connect_pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-alias.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Alias operations
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and alias counts
    Info,
}

/// Alias subcommands.
#[derive(Subcommand)]
enum AliasAction {
    /// Create the alias of a URL, or print the existing one
    Create {
        /// Original URL
        url: String,

        /// Base used to print the full short URL
        #[arg(short, long, default_value = "http://localhost:8080")]
        base: String,
    },

    /// Resolve a code, honouring expiration
    Resolve {
        /// Short code
        code: String,
    },

    /// Show the stored alias for a code, even if expired
    Show {
        /// Short code
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    println!(
        "{} {}",
        "Database:".bright_black(),
        mask_connection_string(&config.database_url).bright_black()
    );

    let pool = connect_pool(&config)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await,
        Commands::Alias { action } => handle_alias_action(action, pool.clone(), &config).await,
    };

    pool.close().await;

    result
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let repo = PgAliasRepository::new(Arc::new(pool.clone()));
            let total = repo
                .count_all()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count aliases: {}", e))?;
            let active = repo
                .count_active(SystemClock.now())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count aliases: {}", e))?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Aliases:    {}", total.to_string().bright_green().bold());
            println!("  Active:     {}", active.to_string().bright_green().bold());
            println!(
                "  Expired:    {}",
                (total - active).to_string().bright_black()
            );
            println!();
        }
    }

    Ok(())
}

/// Handles alias commands through the same service the server uses.
async fn handle_alias_action(action: AliasAction, pool: PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool);

    match action {
        AliasAction::Create { url, base } => {
            let service = build_alias_service(pool, config);

            let created = service
                .create_alias(&url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create alias: {}", e))?;

            let label = if created.reused {
                "Existing alias".yellow()
            } else {
                "Alias created".green()
            };

            println!("{}", label.bold());
            println!("  Original: {}", created.original_url.cyan());
            println!(
                "  Short:    {}",
                service.short_url(&base, &created.code).bright_yellow()
            );
        }
        AliasAction::Resolve { code } => {
            let service = build_alias_service(pool, config);

            match service
                .resolve_alias(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to resolve alias: {}", e))?
            {
                Resolution::Found(url) => {
                    println!("{} {}", "Redirects to".green(), url.cyan());
                }
                Resolution::Expired => {
                    println!("{}", "Unknown or expired code".yellow());
                }
            }
        }
        AliasAction::Show { code } => {
            let repo = PgAliasRepository::new(pool);

            let alias = repo
                .find_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Alias not found")?;

            let status = if alias.is_resolvable_at(SystemClock.now()) {
                "ACTIVE".green()
            } else {
                "EXPIRED".red()
            };

            println!("  ID:       {}", alias.id.to_string().bright_black());
            println!("  Code:     {}", alias.short_code.cyan());
            println!("  Original: {}", alias.original_url);
            println!(
                "  Created:  {}",
                alias.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "  Expires:  {}",
                alias.expires_at().format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("  Status:   {}", status);
        }
    }

    Ok(())
}
