use casemgr_backend::config::{init_logging, Settings};
use casemgr_backend::AppData;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();
    init_logging()?;

    let settings = Settings::from_env()?;

    let db = Database::connect(&settings.database_url).await?;
    tracing::info!(database_url = %settings.database_url, "connected to database");

    Migrator::up(&db, None).await?;
    tracing::info!("database migrations completed");

    let app = AppData::init(db, settings);
    app.role_store.seed_roles().await?;

    tracing::info!("casemgr core ready");
    Ok(())
}
