use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::services::TokenService;
use crate::stores::{FollowStore, RoleStore, ScenarioStore, UserStore};

/// Centralized application data following the main-owned stores pattern:
/// every store and service is created once here and shared behind `Arc`.
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Settings,
    pub token_service: Arc<TokenService>,
    pub role_store: Arc<RoleStore>,
    pub user_store: Arc<UserStore>,
    pub scenario_store: Arc<ScenarioStore>,
    pub follow_store: Arc<FollowStore>,
}

impl AppData {
    /// Wire up all stores and services. The database must already be
    /// connected and migrated.
    pub fn init(db: DatabaseConnection, settings: Settings) -> Self {
        tracing::debug!("initializing stores");
        let token_service = Arc::new(TokenService::new(settings.secret_key.clone()));
        let role_store = Arc::new(RoleStore::new(db.clone()));
        let user_store = Arc::new(UserStore::new(db.clone(), token_service.clone(), &settings));
        let scenario_store = Arc::new(ScenarioStore::new(db.clone()));
        let follow_store = Arc::new(FollowStore::new(db.clone()));

        Self {
            db,
            settings,
            token_service,
            role_store,
            user_store,
            scenario_store,
            follow_store,
        }
    }
}
