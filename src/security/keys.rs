/// Signing key handling
///
/// The process holds exactly one symmetric signing key for its lifetime. It
/// is created during startup, threaded into the token service by value, and
/// never regenerated. There is no persistence and no rotation: restarting the
/// process invalidates every previously issued token.
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{AuthError, Result};

/// Minimum key length for HMAC-SHA-256.
const MIN_KEY_BYTES: usize = 32;

/// Symmetric HMAC signing key, held in memory only.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Generate a fresh 256-bit key from the OS CSPRNG.
    ///
    /// Failure here is fatal to startup; the service must not run without a
    /// usable signing key.
    pub fn generate() -> Result<Self> {
        let mut bytes = vec![0u8; MIN_KEY_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AuthError::KeyGeneration(format!("OS RNG unavailable: {e}")))?;
        Ok(Self(bytes))
    }

    /// Load a configured key from its base64 encoding.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| AuthError::KeyGeneration(format!("invalid base64 signing key: {e}")))?;
        if bytes.len() < MIN_KEY_BYTES {
            return Err(AuthError::KeyGeneration(format!(
                "signing key must be at least {MIN_KEY_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Key material must never reach logs.
impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}
