//! CLI administration tool for wanderlust.
//!
//! Database checks, migrations, statistics and sample data without going
//! through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Insert sample listings
//! cargo run --bin admin -- seed --yes
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection

use wanderlust::config::{Config, mask_connection_string};
use wanderlust::domain::entities::{ListingFields, NewReview};
use wanderlust::domain::repositories::{ListingRepository, ReviewRepository};
use wanderlust::infrastructure::persistence::{PgListingRepository, PgReviewRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

/// CLI tool for managing wanderlust.
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
    /// Show listing and review statistics
    Stats {
        /// Number of most-reviewed listings to show
        #[arg(short, long, default_value_t = 5)]
        top: i64,
    },

    /// Insert sample listings with reviews
    Seed {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

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

    /// Apply pending migrations
    Migrate,
}

#[derive(FromRow)]
struct ReviewedListing {
    id: i64,
    title: String,
    review_count: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .context("DATABASE_URL (or DB_USER, DB_PASSWORD, DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Stats { top } => handle_stats(&pool, top).await?,
        Commands::Seed { yes } => handle_seed(&pool, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays listing and review counts and the most-reviewed listings.
async fn handle_stats(pool: &PgPool, top: i64) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let listings_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listings")
        .fetch_one(pool)
        .await?;

    let reviews_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(pool)
        .await?;

    let average_rating: Option<f64> =
        sqlx::query_scalar("SELECT AVG(rating)::DOUBLE PRECISION FROM reviews")
            .fetch_one(pool)
            .await?;

    println!(
        "  Listings:       {}",
        listings_count.to_string().bright_green().bold()
    );
    println!(
        "  Reviews:        {}",
        reviews_count.to_string().bright_green().bold()
    );
    println!(
        "  Average rating: {}",
        average_rating
            .map(|r| format!("{r:.2}"))
            .unwrap_or_else(|| "-".to_string())
            .bright_green()
            .bold()
    );
    println!();

    let most_reviewed: Vec<ReviewedListing> = sqlx::query_as(
        r#"
        SELECT l.id, l.title, COUNT(r.id) AS review_count
        FROM listings l
        JOIN reviews r ON r.listing_id = l.id
        GROUP BY l.id, l.title
        ORDER BY review_count DESC, l.id
        LIMIT $1
        "#,
    )
    .bind(top)
    .fetch_all(pool)
    .await?;

    if most_reviewed.is_empty() {
        println!("{}", "  No reviews yet".yellow());
        println!();
        return Ok(());
    }

    println!("{}", "Most reviewed:".bright_white().bold());
    println!(
        "  {:<6} {:<40} {:<8}",
        "ID".bright_white().bold(),
        "Title".bright_white().bold(),
        "Reviews".bright_white().bold()
    );
    println!("  {}", "─".repeat(56).bright_black());

    for listing in &most_reviewed {
        println!(
            "  {:<6} {:<40} {}",
            listing.id.to_string().bright_black(),
            listing.title.cyan(),
            listing.review_count.to_string().bright_green()
        );
    }
    println!();

    Ok(())
}

/// Inserts a few sample listings, each with reviews, through the repositories.
async fn handle_seed(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🌱 Seed sample listings".bright_blue().bold());
    println!();

    let samples = sample_listings();
    for (fields, reviews) in &samples {
        println!(
            "  {} ({}, {}) with {} reviews",
            fields.title.cyan(),
            fields.location,
            fields.country,
            reviews.len()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Insert {} listings?", samples.len()))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let pool = Arc::new(pool.clone());
    let listings = PgListingRepository::new(pool.clone());
    let review_repo = PgReviewRepository::new(pool);

    for (fields, reviews) in samples {
        let listing = listings
            .create(fields)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create listing: {}", e))?;

        for review in reviews {
            review_repo
                .add_to_listing(listing.id, review)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add review: {}", e))?;
        }

        println!(
            "  {} {} (id {})",
            "✓".green(),
            listing.title,
            listing.id.to_string().bright_black()
        );
    }

    println!();
    println!("{}", "✅ Sample data inserted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🚚 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn sample_listings() -> Vec<(ListingFields, Vec<NewReview>)> {
    let review = |comment: &str, rating: i32| NewReview {
        comment: comment.to_string(),
        rating: Some(rating),
    };

    vec![
        (
            ListingFields {
                title: "Cozy Beachfront Cottage".to_string(),
                description: Some(Some("Wake up to the sound of the waves.".to_string())),
                price: 1500.0,
                location: "Malibu".to_string(),
                country: "United States".to_string(),
                image_url: Some(
                    "https://images.unsplash.com/photo-1552733407-5d5c46c3bb3b".to_string(),
                ),
            },
            vec![review("Perfect for a weekend", 5), review("A bit noisy", 3)],
        ),
        (
            ListingFields {
                title: "Modern Loft in Downtown".to_string(),
                description: Some(Some("Walking distance to galleries and cafes.".to_string())),
                price: 1200.0,
                location: "New York City".to_string(),
                country: "United States".to_string(),
                image_url: None,
            },
            vec![review("Great location", 4)],
        ),
        (
            ListingFields {
                title: "Mountain Retreat".to_string(),
                description: None,
                price: 1000.0,
                location: "Aspen".to_string(),
                country: "United States".to_string(),
                image_url: Some(
                    "https://images.unsplash.com/photo-1571896349842-33c89424de2d".to_string(),
                ),
            },
            Vec::new(),
        ),
    ]
}
