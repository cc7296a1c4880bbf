/// Data models for authentication
pub mod user;

pub use user::{Role, User};
