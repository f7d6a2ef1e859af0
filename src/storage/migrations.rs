// storage/migrations.rs
// Database migration management

use sqlx::PgPool;

/// Runs SQLx migrations located in the `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    let migrations_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir.as_path()).await?;
    migrator.run(pool).await?;
    Ok(())
}
