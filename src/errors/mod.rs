// Errors layer - Error type definitions
pub mod internal;
pub mod token;

pub use internal::InternalError;
pub use token::TokenError;
