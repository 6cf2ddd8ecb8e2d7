// Internal domain types - not persisted, not exposed over any wire
pub mod auth;
pub mod identity;

pub use auth::{Claims, TokenPurpose};
pub use identity::Identity;
