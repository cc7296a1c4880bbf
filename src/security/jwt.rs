/// Token issuance and verification
///
/// Tokens are compact HS256 JWTs carrying `{sub, iat, exp}`. Validity derives
/// purely from signature and expiry; nothing is stored server-side and there
/// is no revocation. Expiry is detected lazily at validation time.
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};
use crate::security::keys::SigningKey;

/// Keyed MAC algorithm used for every token.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(key: &SigningKey, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            ttl,
        }
    }

    /// Issue a signed token for `username`, expiring after the configured TTL.
    pub fn issue(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AuthError::Internal("Token TTL overflows the expiry timestamp".to_string())
        })?;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| AuthError::Internal("Failed to sign token".to_string()))
    }

    /// Parse and signature-verify a token, returning its claims.
    ///
    /// Expiry is not enforced here: `extract_subject` and `extract_expiry`
    /// must work on expired-but-authentic tokens, keeping expiry a separate
    /// condition from authenticity.
    fn decode_claims(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Subject (username) claim of a signature-verified token.
    pub fn extract_subject(&self, token: &str) -> Result<String> {
        Ok(self.decode_claims(token)?.sub)
    }

    /// Expiry claim of a signature-verified token.
    pub fn extract_expiry(&self, token: &str) -> Result<DateTime<Utc>> {
        let claims = self.decode_claims(token)?;
        Utc.timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(AuthError::TokenInvalid)
    }

    /// True iff the token's expiry lies strictly before the current time.
    pub fn is_expired(&self, token: &str) -> Result<bool> {
        Ok(self.decode_claims(token)?.exp < Utc::now().timestamp())
    }

    /// True iff the token belongs to `expected_username` and has not expired.
    ///
    /// A malformed or badly signed token is `TokenInvalid`, never a silent
    /// `false`; callers decide whether to treat that as anonymity.
    pub fn validate(&self, token: &str, expected_username: &str) -> Result<bool> {
        let claims = self.decode_claims(token)?;
        Ok(claims.sub == expected_username && claims.exp >= Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_TTL_SECS: i64 = 108_000;

    fn service_with_ttl(ttl_secs: i64) -> TokenService {
        let key = SigningKey::generate().expect("generate key");
        TokenService::new(&key, Duration::seconds(ttl_secs))
    }

    fn service() -> TokenService {
        service_with_ttl(DEFAULT_TTL_SECS)
    }

    /// Flip the first character of the signature segment.
    fn tamper_signature(token: &str) -> String {
        let (head, sig) = token.rsplit_once('.').expect("three-segment token");
        let mut chars: Vec<char> = sig.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", head, chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issued_token_is_compact_jwt() {
        let token = service().issue("alice").unwrap();
        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    fn test_extract_subject_roundtrip() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        assert_eq!(tokens.extract_subject(&token).unwrap(), "alice");
    }

    #[test]
    fn test_extract_expiry_matches_ttl() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();

        let expiry = tokens.extract_expiry(&token).unwrap();
        let expected = Utc::now() + Duration::seconds(DEFAULT_TTL_SECS);
        let drift = (expiry - expected).num_seconds().abs();
        assert!(drift <= 2, "expiry drifted {drift}s from iat + ttl");
    }

    #[test]
    fn test_fresh_token_validates() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();

        assert!(!tokens.is_expired(&token).unwrap());
        assert!(tokens.validate(&token, "alice").unwrap());
    }

    #[test]
    fn test_validate_rejects_other_subject() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        assert!(!tokens.validate(&token, "bob").unwrap());
    }

    #[test]
    fn test_expired_token_still_parses() {
        let tokens = service_with_ttl(-1);
        let token = tokens.issue("alice").unwrap();

        // Authenticity and expiry are separate: the subject is still
        // extractable, but validation fails.
        assert_eq!(tokens.extract_subject(&token).unwrap(), "alice");
        assert!(tokens.is_expired(&token).unwrap());
        assert!(!tokens.validate(&token, "alice").unwrap());
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        let tampered = tamper_signature(&token);

        assert!(matches!(
            tokens.extract_subject(&tampered),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(
            tokens.validate(&tampered, "alice"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let tokens = service();
        for garbage in ["", "not-a-token", "a.b", "a.b.c"] {
            assert!(matches!(
                tokens.extract_subject(garbage),
                Err(AuthError::TokenInvalid)
            ));
        }
    }

    #[test]
    fn test_absurd_ttl_is_an_error_not_a_panic() {
        // Close to the TimeDelta maximum; adding it to the current time
        // overflows the datetime range.
        let tokens = service_with_ttl(i64::MAX / 1000);
        assert!(matches!(
            tokens.issue("alice"),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_token_from_other_key_is_invalid() {
        let token = service().issue("alice").unwrap();
        let other = service();
        assert!(matches!(
            other.extract_subject(&token),
            Err(AuthError::TokenInvalid)
        ));
    }
}
