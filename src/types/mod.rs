pub mod db;
pub mod internal;
pub mod permission;

pub use permission::{Permission, Permissions};
