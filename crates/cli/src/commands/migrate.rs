//! Database migration command.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string for the orders API
//!
//! # Migration Files
//!
//! `crates/api/migrations/`

use secrecy::SecretString;

use drive_thru_api::db;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the orders API migrations.
///
/// Uses `database_url` if given, otherwise `DATABASE_URL` from the
/// environment or `.env`.
///
/// # Errors
///
/// Returns an error if no connection string is available, the database is
/// unreachable, or a migration fails.
pub async fn run(database_url: Option<String>) -> Result<(), MigrationError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .filter(|url| !url.is_empty())
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to orders database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running orders migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Orders migrations complete!");
    Ok(())
}
