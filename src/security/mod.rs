/// Security primitives: signing key, tokens, password hashing
pub mod jwt;
pub mod keys;
pub mod password;

pub use jwt::TokenService;
pub use keys::SigningKey;
