// Services layer - Business logic shared by the stores
pub mod crypto;
pub mod token_service;

pub use token_service::{TokenService, DEFAULT_TOKEN_TTL_SECS};
