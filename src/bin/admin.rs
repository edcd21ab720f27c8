//! CLI administration tool for shortlink.
//!
//! Works directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all short URLs
//! cargo run --bin admin -- urls list
//!
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- urls create https://example.com --code promo
//!
//! # Inspect one short URL without counting a click
//! cargo run --bin admin -- urls stats promo
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`), plus
//! `BASE_URL` for printing short URLs.

use shortlink::application::services::UrlService;
use shortlink::config;
use shortlink::domain::entities::Url;
use shortlink::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

/// CLI tool for managing shortlink.
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
    /// Manage short URLs
    Urls {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Url management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// List all short URLs, newest first
    List,

    /// Create a short URL
    Create {
        /// Long URL to shorten (prompted if omitted)
        url: Option<String>,

        /// Custom short code (generated if omitted)
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show one short URL without counting a click
    Stats {
        /// Short code to inspect
        code: String,
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

    let database_url = config::Config::from_env()
        .map(|c| c.database_url)
        .context("Database configuration is required")?;
    anyhow::ensure!(
        !database_url.is_empty(),
        "The admin tool requires PostgreSQL storage"
    );
    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::Urls { action } => handle_url_action(action, &pool, &base_url).await,
        Commands::Stats => handle_stats(&pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

/// Dispatches url management commands.
async fn handle_url_action(action: UrlAction, pool: &PgPool, base_url: &str) -> Result<()> {
    let repository = Arc::new(PgUrlRepository::new(pool.clone()));
    let service = UrlService::new(repository, base_url);

    match action {
        UrlAction::List => list_urls(&service).await,
        UrlAction::Create { url, code, yes } => create_url(&service, url, code, yes).await,
        UrlAction::Stats { code } => show_url(&service, &code).await,
    }
}

/// Lists all short URLs as a table.
///
/// ```text
///   Code       Clicks  Created           Long URL
///   ─────────────────────────────────────────────────────────────
///   promo      12      2024-06-01 10:30  https://example.com/spring
/// ```
async fn list_urls(service: &UrlService) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let urls = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    if urls.is_empty() {
        println!("{}", "  No short URLs yet".yellow());
        println!();
        println!(
            "  Create one with: {} admin urls create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for url in &urls {
        println!(
            "  {:<12} {:<7} {:<17} {}",
            url.short_code.cyan(),
            url.clicks.to_string().bright_green(),
            url.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            url.long_url
        );
    }

    println!();
    println!("  Total: {}", urls.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates a short URL with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the long URL (or use provided)
/// 2. Show what will be created
/// 3. Confirm (unless `--yes`)
/// 4. Shorten through [`UrlService`], same rules as the HTTP API
async fn create_url(
    service: &UrlService,
    url: Option<String>,
    code: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✂️  Create Short URL".bright_blue().bold());
    println!();

    let long_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Long URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  Long URL: {}", long_url.cyan());
    match &code {
        Some(c) => println!("  Code:     {}", c.bright_yellow()),
        None => println!("  Code:     {}", "(generated)".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this short URL?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let shortened = service
        .create_short_url(long_url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!();
    println!("{}", "✅ Short URL created!".green().bold());
    println!("  {}", shortened.short_url.bright_yellow().bold());
    println!();

    Ok(())
}

/// Shows one short URL. Does not count a click.
async fn show_url(service: &UrlService, code: &str) -> Result<()> {
    let url: Url = service
        .stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short URL not found")?;

    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();
    println!("  Code:      {}", url.short_code.cyan());
    println!("  Short URL: {}", service.short_url(&url.short_code));
    println!("  Long URL:  {}", url.long_url);
    println!(
        "  Clicks:    {}",
        url.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:   {}",
        url.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    );
    println!(
        "  Updated:   {}",
        url.updated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    );
    println!();

    Ok(())
}

/// Displays total URL and click counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (urls_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
            .fetch_one(pool)
            .await?;

    println!(
        "  Short URLs: {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:     {}",
        clicks_count.to_string().bright_green().bold()
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
