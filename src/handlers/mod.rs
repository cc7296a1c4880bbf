/// HTTP request handlers (REST API)
pub mod applications;
pub mod auth;

pub use applications::list_applications;
pub use auth::{login, me, register, LoginResponse, MeResponse, RegisterResponse};
