// Stores layer - Data access per aggregate
pub mod follow_store;
pub mod role_store;
pub mod scenario_store;
pub mod user_store;

pub use follow_store::FollowStore;
pub use role_store::RoleStore;
pub use scenario_store::ScenarioStore;
pub use user_store::UserStore;
