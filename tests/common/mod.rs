// Common test utilities for integration tests

use casemgr_backend::config::Settings;
use casemgr_backend::AppData;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

pub const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";

/// Creates an in-memory database with migrations applied and all stores
/// wired up. Roles are not seeded; tests that need them call
/// `seed_roles()` themselves.
pub async fn setup_app() -> AppData {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let settings = Settings::new(TEST_SECRET, TEST_ADMIN_EMAIL, "sqlite::memory:")
        .expect("Failed to build test settings");

    AppData::init(db, settings)
}

/// Seeds roles and creates a regular (non-admin) user.
pub async fn setup_app_with_user() -> (AppData, casemgr_backend::types::db::user::Model) {
    let app = setup_app().await;
    app.role_store.seed_roles().await.expect("Failed to seed roles");
    let user = app
        .user_store
        .create_user("alice@example.com", "alice", "correct-horse")
        .await
        .expect("Failed to create test user");
    (app, user)
}
