// Database entities - SeaORM models
pub mod case;
pub mod follow;
pub mod rely;
pub mod role;
pub mod scenario;
pub mod user;
